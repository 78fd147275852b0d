//! Response-action vocabulary: sorted distinct labels and their class indices.

use crate::records::DisasterRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpace {
    labels: Vec<String>,
}

impl LabelSpace {
    pub fn from_records(records: &[DisasterRecord]) -> Self {
        let mut labels: Vec<String> = records.iter().map(|r| r.response_action.clone()).collect();
        labels.sort();
        labels.dedup();
        Self { labels }
    }

    /// Labels referenced by `indices`, sorted and deduplicated. Out-of-range indices are
    /// skipped.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let mut picked: Vec<usize> = indices.iter().copied().filter(|&i| i < self.labels.len()).collect();
        picked.sort_unstable();
        picked.dedup();
        Self {
            labels: picked.into_iter().map(|i| self.labels[i].clone()).collect(),
        }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
