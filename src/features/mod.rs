//! Categorical records → numeric features: schema derivation, encoding, seeded train/test split.

mod dataset;
mod encoder;
mod schema;
mod split;

pub use dataset::EncodedDataset;
pub use encoder::{encode, encode_checked, Encoded};
pub use schema::{FeatureColumn, FeatureSchema};
pub use split::split;

use ndarray::{aview1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Fixed-length feature row aligned 1:1 with the schema it was encoded under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedVector {
    pub values: Vec<f64>,
}

impl EncodedVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        aview1(&self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
