//! Historical disaster records and inference requests; the shared categorical fields.

mod dataset;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use dataset::{load_records, sample_records};

/// One historical observation: what happened and what responders did about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterRecord {
    pub disaster_type: String,
    pub location: String,
    pub severity: i64,
    pub response_action: String,
}

impl DisasterRecord {
    pub fn new(
        disaster_type: impl Into<String>,
        location: impl Into<String>,
        severity: i64,
        response_action: impl Into<String>,
    ) -> Self {
        Self {
            disaster_type: disaster_type.into(),
            location: location.into(),
            severity,
            response_action: response_action.into(),
        }
    }
}

/// Symbolic input from the presentation layer. Values are not checked against any domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub disaster_type: String,
    pub location: String,
    pub severity: i64,
}

impl PredictionRequest {
    pub fn new(disaster_type: impl Into<String>, location: impl Into<String>, severity: i64) -> Self {
        Self {
            disaster_type: disaster_type.into(),
            location: location.into(),
            severity,
        }
    }
}

impl From<&DisasterRecord> for PredictionRequest {
    fn from(r: &DisasterRecord) -> Self {
        Self::new(r.disaster_type.clone(), r.location.clone(), r.severity)
    }
}

/// Fields that are one-hot encoded. Declaration order is the schema column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    DisasterType,
    Location,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 2] = [CategoricalField::DisasterType, CategoricalField::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::DisasterType => "disaster_type",
            CategoricalField::Location => "location",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the encoder can turn into a feature vector: a training record or a bare request.
pub trait Encodable {
    fn category(&self, field: CategoricalField) -> &str;
    fn severity(&self) -> i64;
}

impl Encodable for DisasterRecord {
    fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::DisasterType => &self.disaster_type,
            CategoricalField::Location => &self.location,
        }
    }

    fn severity(&self) -> i64 {
        self.severity
    }
}

impl Encodable for PredictionRequest {
    fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::DisasterType => &self.disaster_type,
            CategoricalField::Location => &self.location,
        }
    }

    fn severity(&self) -> i64 {
        self.severity
    }
}
