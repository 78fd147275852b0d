//! Serving side: an immutable schema + model pairing answering single requests.

use crate::error::{RecommenderError, Result};
use crate::features::{encode_checked, FeatureSchema};
use crate::model::{LabelSpace, ResponseModel};
use crate::records::{CategoricalField, PredictionRequest};
use serde::{Deserialize, Serialize};

/// Label for one request plus the fields whose value the schema had never seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unseen: Vec<CategoricalField>,
}

/// Frozen `{schema, model, label space}`. Built once per training run and shared by
/// reference (usually behind an `Arc`); nothing here mutates after construction.
#[derive(Debug, Clone)]
pub struct RecommenderContext {
    schema: FeatureSchema,
    model: ResponseModel,
}

impl RecommenderContext {
    /// Pairs a model with the schema it was trained under.
    pub fn new(schema: FeatureSchema, model: ResponseModel) -> Result<Self> {
        if model.schema_fingerprint() != schema.fingerprint()
            || model.forest().n_features() != schema.len()
        {
            return Err(RecommenderError::SchemaMismatch {
                expected: model.schema_fingerprint().to_string(),
                actual: schema.fingerprint().to_string(),
            });
        }
        Ok(Self { schema, model })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model(&self) -> &ResponseModel {
        &self.model
    }

    pub fn label_space(&self) -> &LabelSpace {
        self.model.labels()
    }

    pub fn predict(&self, request: &PredictionRequest) -> String {
        self.predict_detailed(request).label
    }

    /// Unseen categories are zero-filled, not rejected; the answer is whatever the
    /// ensemble makes of the remaining columns. A warning is logged for each such call.
    pub fn predict_detailed(&self, request: &PredictionRequest) -> Prediction {
        let encoded = encode_checked(request, &self.schema);
        if !encoded.unseen.is_empty() {
            tracing::warn!(
                disaster_type = %request.disaster_type,
                location = %request.location,
                unseen = ?encoded.unseen,
                "request has categories absent from training; encoded as all-zero"
            );
        }
        // new() pinned the model to this schema, so the vector width always matches.
        let label = match self.model.predict_vector(&encoded.vector) {
            Ok(label) => label.to_string(),
            Err(e) => {
                debug_assert!(false, "prediction failed under a paired schema: {e}");
                tracing::error!(error = %e, "prediction failed under a paired schema");
                String::new()
            }
        };
        Prediction {
            label,
            unseen: encoded.unseen,
        }
    }
}

/// `predict(context, request) -> label`; no hidden state, callable from any thread.
pub fn predict(context: &RecommenderContext, request: &PredictionRequest) -> String {
    context.predict(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForestConfig;
    use crate::features::EncodedDataset;
    use crate::model::train;
    use crate::records::sample_records;

    fn context() -> RecommenderContext {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let labels = LabelSpace::from_records(&records);
        let ds = EncodedDataset::encode(&records, &schema, &labels).unwrap();
        let model = train(&ds, &schema, &labels, &ForestConfig::default()).unwrap();
        RecommenderContext::new(schema, model).unwrap()
    }

    #[test]
    fn exact_training_tuple_reproduces_label() {
        let ctx = context();
        assert_eq!(predict(&ctx, &PredictionRequest::new("Flood", "Urban", 3)), "Evacuate");
    }

    #[test]
    fn unseen_type_still_answers_from_label_space() {
        let ctx = context();
        let p = ctx.predict_detailed(&PredictionRequest::new("Wildfire", "Urban", 4));
        assert!(ctx.label_space().contains(&p.label));
        assert_eq!(p.unseen, vec![CategoricalField::DisasterType]);
    }

    #[test]
    fn unseen_location_and_both_fields() {
        let ctx = context();
        let p = ctx.predict_detailed(&PredictionRequest::new("Flood", "Orbit", 2));
        assert_eq!(p.unseen, vec![CategoricalField::Location]);
        assert!(ctx.label_space().contains(&p.label));

        let p = ctx.predict_detailed(&PredictionRequest::new("Wildfire", "Orbit", 2));
        assert_eq!(
            p.unseen,
            vec![CategoricalField::DisasterType, CategoricalField::Location]
        );
        assert!(ctx.label_space().contains(&p.label));
    }

    #[test]
    fn label_space_is_training_rows_only() {
        let records = sample_records();
        let schema = FeatureSchema::build(&records);
        let vocabulary = LabelSpace::from_records(&records);
        let ds = EncodedDataset::encode(&records, &schema, &vocabulary).unwrap();
        let model = train(&ds.select(&[0, 1, 3]), &schema, &vocabulary, &ForestConfig::default()).unwrap();
        let ctx = RecommenderContext::new(schema, model).unwrap();
        assert_eq!(ctx.label_space().as_slice(), &["Evacuate", "Search and Rescue"]);
        let p = ctx.predict(&PredictionRequest::new("Cyclone", "Coastal", 4));
        assert!(ctx.label_space().contains(&p));
    }

    #[test]
    fn known_request_reports_nothing_unseen() {
        let ctx = context();
        let p = ctx.predict_detailed(&PredictionRequest::new("Cyclone", "Coastal", 4));
        assert!(p.unseen.is_empty());
        assert_eq!(serde_json::to_string(&p).unwrap(), format!(r#"{{"label":"{}"}}"#, p.label));
    }

    #[test]
    fn model_from_other_schema_is_refused() {
        let ctx = context();
        let other = FeatureSchema::build(&sample_records()[..2]);
        let err = RecommenderContext::new(other, ctx.model().clone()).unwrap_err();
        assert!(matches!(err, RecommenderError::SchemaMismatch { .. }));
    }
}
