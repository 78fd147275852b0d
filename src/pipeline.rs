//! One-shot training pipeline: `Empty → SchemaBuilt → Trained → Serving`.
//!
//! Each stage is its own type and consumes the previous one, so a half-built model can
//! never reach the predictor. Retraining means running a fresh pipeline.

use crate::config::RecommenderConfig;
use crate::error::{RecommenderError, Result};
use crate::features::{split, EncodedDataset, FeatureSchema};
use crate::model::{evaluate, train, LabelSpace};
use crate::recommender::RecommenderContext;
use crate::records::DisasterRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of a training run, for operator logs.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub n_records: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub n_features: usize,
    /// Labels present in the training rows
    pub labels: Vec<String>,
    /// Absent when the held-out set was empty
    pub accuracy: Option<f64>,
}

#[derive(Debug, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn build_schema(self, records: Vec<DisasterRecord>) -> SchemaBuilt {
        let schema = FeatureSchema::build(&records);
        let vocabulary = LabelSpace::from_records(&records);
        info!(
            stage = "schema_built",
            records = records.len(),
            columns = schema.len(),
            labels = vocabulary.len(),
            "feature schema frozen"
        );
        SchemaBuilt {
            records,
            schema,
            vocabulary,
        }
    }
}

#[derive(Debug)]
pub struct SchemaBuilt {
    records: Vec<DisasterRecord>,
    schema: FeatureSchema,
    /// Every label in the records, held-out rows included
    vocabulary: LabelSpace,
}

impl SchemaBuilt {
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn vocabulary(&self) -> &LabelSpace {
        &self.vocabulary
    }

    /// Encode, split, fit and score. Any training error aborts the pipeline; an empty
    /// held-out set only drops the accuracy figure.
    pub fn train(self, config: &RecommenderConfig) -> Result<Trained> {
        config.validate()?;
        let dataset = EncodedDataset::encode(&self.records, &self.schema, &self.vocabulary)?;
        let (train_set, test_set) = split(&dataset, config.split.held_out_fraction, config.split.seed);

        let model = train(&train_set, &self.schema, &self.vocabulary, &config.forest)?;
        let accuracy = match evaluate(&model, &test_set) {
            Ok(acc) => {
                info!(accuracy = acc, n_test = test_set.len(), "model evaluated");
                Some(acc)
            }
            Err(RecommenderError::InsufficientData(reason)) => {
                warn!(%reason, "evaluation skipped");
                None
            }
            Err(e) => return Err(e),
        };

        let report = TrainingReport {
            model_id: model.id(),
            trained_at: model.trained_at(),
            n_records: dataset.len(),
            n_train: train_set.len(),
            n_test: test_set.len(),
            n_features: self.schema.len(),
            labels: model.labels().as_slice().to_vec(),
            accuracy,
        };
        let context = RecommenderContext::new(self.schema, model)?;
        info!(stage = "trained", model_id = %report.model_id, "pipeline trained");
        Ok(Trained {
            context: Arc::new(context),
            report,
        })
    }
}

#[derive(Debug)]
pub struct Trained {
    context: Arc<RecommenderContext>,
    report: TrainingReport,
}

impl Trained {
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn context(&self) -> &RecommenderContext {
        &self.context
    }

    /// Hand the frozen context to the serving side.
    pub fn serve(self) -> (Arc<RecommenderContext>, TrainingReport) {
        info!(stage = "serving", "accepting predictions");
        (self.context, self.report)
    }
}

/// Convenience: run every stage on `records`.
pub fn build(records: Vec<DisasterRecord>, config: &RecommenderConfig) -> Result<Trained> {
    Pipeline::new().build_schema(records).train(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::sample_records;

    #[test]
    fn default_run_on_sample() {
        let trained = build(sample_records(), &RecommenderConfig::default()).unwrap();
        let r = trained.report();
        assert_eq!((r.n_records, r.n_train, r.n_test, r.n_features), (5, 4, 1, 7));
        let acc = r.accuracy.unwrap();
        assert!((0.0..=1.0).contains(&acc));
    }

    #[test]
    fn report_labels_follow_training_split() {
        for seed in 0..20 {
            let mut cfg = RecommenderConfig::default();
            cfg.split.held_out_fraction = 0.4;
            cfg.split.seed = seed;
            cfg.forest.n_estimators = 10;

            let built = Pipeline::new().build_schema(sample_records());
            let dataset =
                EncodedDataset::encode(&sample_records(), built.schema(), built.vocabulary()).unwrap();
            let (train_set, _) = split(&dataset, 0.4, seed);
            let expected = built.vocabulary().subset(&train_set.labels);

            match built.train(&cfg) {
                Ok(trained) => {
                    assert_eq!(trained.context().label_space(), &expected);
                    assert_eq!(trained.report().labels, expected.as_slice());
                }
                Err(RecommenderError::Training(_)) => assert!(expected.len() < 2),
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }

    #[test]
    fn no_held_out_rows_leaves_accuracy_absent() {
        let mut cfg = RecommenderConfig::default();
        cfg.split.held_out_fraction = 0.0;
        let trained = build(sample_records(), &cfg).unwrap();
        assert_eq!(trained.report().n_train, 5);
        assert!(trained.report().accuracy.is_none());
    }

    #[test]
    fn single_label_aborts_before_serving() {
        let records = vec![
            DisasterRecord::new("Flood", "Urban", 3, "Evacuate"),
            DisasterRecord::new("Cyclone", "Coastal", 4, "Evacuate"),
        ];
        let mut cfg = RecommenderConfig::default();
        cfg.split.held_out_fraction = 0.0;
        assert!(matches!(build(records, &cfg), Err(RecommenderError::Training(_))));
    }

    #[test]
    fn empty_records_fail_training() {
        let built = Pipeline::new().build_schema(Vec::new());
        assert_eq!(built.schema().len(), 1);
        assert!(built.train(&RecommenderConfig::default()).is_err());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = RecommenderConfig::default();
        cfg.split.held_out_fraction = -0.1;
        assert!(matches!(
            build(sample_records(), &cfg),
            Err(RecommenderError::InvalidConfig(_))
        ));
    }
}
