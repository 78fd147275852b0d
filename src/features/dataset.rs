//! Encoded training table: one feature row and one label index per record.

use super::{encode, FeatureSchema};
use crate::error::{RecommenderError, Result};
use crate::model::LabelSpace;
use crate::records::DisasterRecord;
use ndarray::{aview1, Array2, Axis};

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDataset {
    /// `n_records x schema.len()`
    pub features: Array2<f64>,
    /// Index into the label space, one per row
    pub labels: Vec<usize>,
}

impl EncodedDataset {
    pub fn encode(
        records: &[DisasterRecord],
        schema: &FeatureSchema,
        labels: &LabelSpace,
    ) -> Result<Self> {
        let mut features = Array2::<f64>::zeros((records.len(), schema.len()));
        let mut label_idx = Vec::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            let v = encode(r, schema);
            features.row_mut(i).assign(&aview1(v.as_slice()));
            let idx = labels.index_of(&r.response_action).ok_or_else(|| {
                RecommenderError::Training(format!(
                    "label {:?} is missing from the label space",
                    r.response_action
                ))
            })?;
            label_idx.push(idx);
        }
        Ok(Self {
            features,
            labels: label_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    pub fn distinct_labels(&self) -> usize {
        let mut seen: Vec<usize> = self.labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::sample_records;

    #[test]
    fn encodes_sample_table() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let labels = LabelSpace::from_records(&records);
        let ds = EncodedDataset::encode(&records, &schema, &labels).unwrap();
        assert_eq!(ds.features.dim(), (5, 7));
        assert_eq!(ds.labels, vec![0, 1, 2, 0, 1]);
        assert_eq!(ds.distinct_labels(), 3);
        assert_eq!(ds.features[[1, 0]], 5.0);
    }

    #[test]
    fn select_keeps_row_label_pairing() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let labels = LabelSpace::from_records(&records);
        let ds = EncodedDataset::encode(&records, &schema, &labels).unwrap();
        let sub = ds.select(&[4, 2]);
        assert_eq!(sub.labels, vec![1, 2]);
        assert_eq!(sub.features.row(0), ds.features.row(4));
        assert!(ds.select(&[]).is_empty());
    }

    #[test]
    fn label_outside_space_is_rejected() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let labels = LabelSpace::from_records(&records[..1]);
        assert!(matches!(
            EncodedDataset::encode(&records, &schema, &labels),
            Err(RecommenderError::Training(_))
        ));
    }
}
