//! Ordered feature columns derived from the training records' categorical domains.

use crate::records::{CategoricalField, DisasterRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureColumn {
    /// Raw severity, copied through unscaled
    Severity,
    /// 1 when the input's `field` equals `value`, else 0
    OneHot { field: CategoricalField, value: String },
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureColumn::Severity => f.write_str("severity"),
            FeatureColumn::OneHot { field, value } => write!(f, "{field}={value}"),
        }
    }
}

/// Frozen column layout a model is trained against.
///
/// Severity is always column 0; one-hot columns follow, sorted by field then value, so
/// the same record multiset always yields the same layout whatever order it arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
    index: BTreeMap<(CategoricalField, String), usize>,
    fingerprint: String,
}

impl FeatureSchema {
    pub fn build(records: &[DisasterRecord]) -> Self {
        let mut pairs: BTreeSet<(CategoricalField, String)> = BTreeSet::new();
        for r in records {
            pairs.insert((CategoricalField::DisasterType, r.disaster_type.clone()));
            pairs.insert((CategoricalField::Location, r.location.clone()));
        }

        let mut columns = Vec::with_capacity(pairs.len() + 1);
        let mut index = BTreeMap::new();
        columns.push(FeatureColumn::Severity);
        for (field, value) in pairs {
            index.insert((field, value.clone()), columns.len());
            columns.push(FeatureColumn::OneHot { field, value });
        }

        let fingerprint = fingerprint(&columns);
        tracing::debug!(columns = columns.len(), %fingerprint, "feature schema built");
        Self {
            columns,
            index,
            fingerprint,
        }
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the one-hot column for `(field, value)`, if that category was seen.
    pub fn column_index(&self, field: CategoricalField, value: &str) -> Option<usize> {
        self.index.get(&(field, value.to_owned())).copied()
    }

    /// Category values known for `field`, in column order.
    pub fn categories(&self, field: CategoricalField) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(move |c| match c {
            FeatureColumn::OneHot { field: f, value } if *f == field => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.to_string()).collect()
    }

    /// Hex SHA-256 over the ordered column names.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(columns: &[FeatureColumn]) -> String {
    let mut hasher = Sha256::new();
    for c in columns {
        hasher.update(c.to_string().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
