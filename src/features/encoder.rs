//! Record/request → feature vector under a fixed schema.
//!
//! A category value with no schema column contributes an all-zero block for its field.
//! The vector carries no trace of this; `encode_checked` reports the affected fields so
//! callers can surface a diagnostic.

use super::{EncodedVector, FeatureColumn, FeatureSchema};
use crate::records::{CategoricalField, Encodable};

/// Encoding result together with the fields whose value had no schema column
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub vector: EncodedVector,
    pub unseen: Vec<CategoricalField>,
}

pub fn encode<E: Encodable + ?Sized>(input: &E, schema: &FeatureSchema) -> EncodedVector {
    encode_checked(input, schema).vector
}

pub fn encode_checked<E: Encodable + ?Sized>(input: &E, schema: &FeatureSchema) -> Encoded {
    let mut values = vec![0.0f64; schema.len()];
    for (slot, column) in values.iter_mut().zip(schema.columns()) {
        *slot = match column {
            FeatureColumn::Severity => input.severity() as f64,
            FeatureColumn::OneHot { field, value } => {
                if input.category(*field) == value {
                    1.0
                } else {
                    0.0
                }
            }
        };
    }

    let unseen = CategoricalField::ALL
        .into_iter()
        .filter(|f| schema.column_index(*f, input.category(*f)).is_none())
        .collect();

    Encoded {
        vector: EncodedVector { values },
        unseen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{sample_records, PredictionRequest};

    fn nonzero_in_field(schema: &FeatureSchema, v: &EncodedVector, field: CategoricalField) -> Vec<f64> {
        schema
            .columns()
            .iter()
            .zip(v.as_slice())
            .filter(|(c, x)| matches!(c, FeatureColumn::OneHot { field: f, .. } if *f == field) && **x != 0.0)
            .map(|(_, x)| *x)
            .collect()
    }

    #[test]
    fn one_hot_per_field_for_training_records() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        for r in &records {
            let v = encode(r, &schema);
            assert_eq!(v.len(), schema.len());
            for field in CategoricalField::ALL {
                assert_eq!(nonzero_in_field(&schema, &v, field), vec![1.0]);
            }
            assert_eq!(v.as_slice()[0], r.severity as f64);
        }
    }

    #[test]
    fn request_matches_record_encoding() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let req = PredictionRequest::from(&records[2]);
        assert_eq!(encode(&req, &schema), encode(&records[2], &schema));
        assert_eq!(
            encode(&req, &schema).as_slice(),
            &[4.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn unseen_category_zero_fills_its_block() {
        let schema = FeatureSchema::build(&sample_records());
        let enc = encode_checked(&PredictionRequest::new("Wildfire", "Urban", 5), &schema);
        assert_eq!(enc.unseen, vec![CategoricalField::DisasterType]);
        assert!(nonzero_in_field(&schema, &enc.vector, CategoricalField::DisasterType).is_empty());
        assert_eq!(nonzero_in_field(&schema, &enc.vector, CategoricalField::Location), vec![1.0]);
    }

    #[test]
    fn severity_passes_through_unvalidated() {
        let schema = FeatureSchema::build(&sample_records());
        let v = encode(&PredictionRequest::new("Flood", "Mars", -40), &schema);
        assert_eq!(v.as_slice()[0], -40.0);
    }

    #[test]
    fn empty_schema_encodes_severity_only() {
        let schema = FeatureSchema::build(&[]);
        let enc = encode_checked(&PredictionRequest::new("Flood", "Urban", 3), &schema);
        assert_eq!(enc.vector.as_slice(), &[3.0]);
        assert_eq!(enc.unseen.len(), 2);
    }
}
