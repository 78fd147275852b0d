//! Bagged ensemble of CART trees with majority-vote inference.

use super::tree::{argmax, DecisionTree, TreeParams};
use crate::config::ForestConfig;
use crate::error::{RecommenderError, Result};
use crate::features::EncodedDataset;
use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Fit `config.n_estimators` trees in parallel. Per-tree seeds are drawn from
    /// `config.seed` before any tree is grown, so the result does not depend on scheduling.
    pub fn fit(data: &EncodedDataset, n_classes: usize, config: &ForestConfig) -> Result<Self> {
        if config.n_estimators == 0 {
            return Err(RecommenderError::Training("n_estimators must be at least 1".into()));
        }
        if data.is_empty() {
            return Err(RecommenderError::Training("training set is empty".into()));
        }
        if let Some(&bad) = data.labels.iter().find(|&&l| l >= n_classes) {
            return Err(RecommenderError::Training(format!(
                "label index {bad} outside a label space of {n_classes}"
            )));
        }
        let distinct = data.distinct_labels();
        if distinct < 2 {
            return Err(RecommenderError::Training(format!(
                "need at least 2 distinct labels to fit a classifier, got {distinct}"
            )));
        }

        let n = data.len();
        let n_features = data.n_features();
        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            max_features: config.max_features.resolve(n_features),
            n_classes,
        };

        let mut master = StdRng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_estimators).map(|_| master.gen()).collect();

        let x = data.features.view();
        let y = data.labels.as_slice();
        let trees: Vec<DecisionTree> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let rows: Vec<usize> = if config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(x, y, rows, &params, &mut rng)
            })
            .collect();

        tracing::debug!(
            trees = trees.len(),
            n,
            n_features,
            max_features = params.max_features,
            "forest fitted"
        );
        Ok(Self {
            trees,
            n_classes,
            n_features,
        })
    }

    /// Per-class vote counts for one row.
    pub fn votes(&self, row: ArrayView1<'_, f64>) -> Vec<usize> {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1;
        }
        votes
    }

    /// Majority-vote class; ties go to the lowest class index.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> usize {
        argmax(&self.votes(row))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}
