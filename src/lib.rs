//! Disaster response recommender — historical (type, location, severity) → action records
//! turned into a random-forest classifier that answers single requests.
//!
//! Modular structure:
//! - [`records`] — Record/request types, sample table, JSON loading
//! - [`features`] — Feature schema, one-hot encoding, seeded train/test split
//! - [`model`] — CART trees, bagged forest, training and evaluation
//! - [`recommender`] — Immutable schema + model context serving predictions
//! - [`pipeline`] — Staged training run producing the context
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod records;
pub mod features;
pub mod model;
pub mod recommender;
pub mod pipeline;
pub mod logging;

pub use config::RecommenderConfig;
pub use error::{RecommenderError, Result};
pub use records::{DisasterRecord, PredictionRequest};
pub use features::{EncodedVector, FeatureSchema};
pub use model::ResponseModel;
pub use recommender::{predict, Prediction, RecommenderContext};
pub use pipeline::{Pipeline, TrainingReport};
pub use logging::StructuredLogger;
