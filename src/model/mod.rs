//! Response classifier: random forest over encoded records, bound to one schema and one
//! label space.

mod forest;
mod labels;
mod tree;

pub use forest::RandomForest;
pub use labels::LabelSpace;
pub use tree::{DecisionTree, Node, TreeParams};

use crate::config::ForestConfig;
use crate::error::{RecommenderError, Result};
use crate::features::{EncodedDataset, EncodedVector, FeatureSchema};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fitted classifier. Read-only after `train`; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ResponseModel {
    id: Uuid,
    trained_at: DateTime<Utc>,
    forest: RandomForest,
    /// Vocabulary the label indices refer to
    vocabulary: LabelSpace,
    /// Labels present in the training rows; every prediction is one of these
    labels: LabelSpace,
    schema_fingerprint: String,
}

impl ResponseModel {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn labels(&self) -> &LabelSpace {
        &self.labels
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Fingerprint of the schema the training rows were encoded under.
    pub fn schema_fingerprint(&self) -> &str {
        &self.schema_fingerprint
    }

    /// Full label vocabulary used to index classes, including labels seen only in
    /// held-out rows.
    pub fn vocabulary(&self) -> &LabelSpace {
        &self.vocabulary
    }

    /// Majority-vote label for a vector encoded under this model's schema. A vector of
    /// any other width is `SchemaMismatch`.
    pub fn predict_vector(&self, vector: &EncodedVector) -> Result<&str> {
        self.check_width(vector.len())?;
        let class = self.forest.predict(vector.view());
        self.vocabulary.label(class).ok_or_else(|| {
            // fit() rejects rows whose label index is outside the vocabulary
            debug_assert!(false, "class {class} outside vocabulary");
            tracing::error!(class, vocabulary = self.vocabulary.len(), "forest voted for unknown class");
            RecommenderError::LabelOutOfRange {
                index: class,
                len: self.vocabulary.len(),
            }
        })
    }

    fn check_width(&self, width: usize) -> Result<()> {
        let expected = self.forest.n_features();
        if width != expected {
            return Err(RecommenderError::SchemaMismatch {
                expected: format!("{expected} columns"),
                actual: format!("{width} columns"),
            });
        }
        Ok(())
    }
}

/// Fit a forest on `train_set`, whose label indices refer to `vocabulary`. Fails with
/// `Training` when the rows hold fewer than two distinct labels or an index outside the
/// vocabulary. The model's label space is the subset present in `train_set`.
pub fn train(
    train_set: &EncodedDataset,
    schema: &FeatureSchema,
    vocabulary: &LabelSpace,
    config: &ForestConfig,
) -> Result<ResponseModel> {
    if train_set.n_features() != schema.len() {
        return Err(RecommenderError::Training(format!(
            "training rows have {} columns, schema has {}",
            train_set.n_features(),
            schema.len()
        )));
    }
    let forest = RandomForest::fit(train_set, vocabulary.len(), config)?;
    let model = ResponseModel {
        id: Uuid::new_v4(),
        trained_at: Utc::now(),
        forest,
        vocabulary: vocabulary.clone(),
        labels: vocabulary.subset(&train_set.labels),
        schema_fingerprint: schema.fingerprint().to_string(),
    };
    tracing::info!(
        model_id = %model.id,
        n_train = train_set.len(),
        n_estimators = config.n_estimators,
        labels = model.labels.len(),
        "model trained"
    );
    Ok(model)
}

/// Fraction of held-out rows whose predicted label equals the true one, in `[0, 1]`.
/// An empty held-out set is `InsufficientData` rather than NaN; rows of the wrong width
/// are `SchemaMismatch`.
pub fn evaluate(model: &ResponseModel, test_set: &EncodedDataset) -> Result<f64> {
    model.check_width(test_set.n_features())?;
    if test_set.is_empty() {
        return Err(RecommenderError::InsufficientData(
            "held-out set is empty; accuracy is undefined".into(),
        ));
    }
    let correct = test_set
        .features
        .outer_iter()
        .zip(&test_set.labels)
        .filter(|(row, &label)| model.forest.predict(row.view()) == label)
        .count();
    Ok(correct as f64 / test_set.len() as f64)
}
