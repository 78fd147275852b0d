//! CART classification tree: Gini impurity, axis-aligned threshold splits, arena nodes.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        /// Rows with `x[feature] <= threshold` go left
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Candidate features drawn per split
    pub max_features: usize,
    pub n_classes: usize,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree over `rows` of `x` (rows may repeat, as in a bootstrap sample).
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[usize],
        rows: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, y, rows, 0, params, rng);
        tree
    }

    pub fn predict(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], at: usize) -> usize {
            match &nodes[at] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    fn grow(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: &[usize],
        rows: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(y, &rows, params.n_classes);
        let majority = argmax(&counts);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = params.max_depth.is_some_and(|d| depth >= d);

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { class: majority });
        if pure || depth_reached || rows.len() < params.min_samples_split {
            return id;
        }

        let Some(best) = best_split(x, y, &rows, params, rng) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| x[[r, best.feature]] <= best.threshold);
        let left = self.grow(x, y, left_rows, depth + 1, params, rng);
        let right = self.grow(x, y, right_rows, depth + 1, params, rng);
        self.nodes[id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        id
    }
}

/// Draws features in random order and keeps the lowest weighted Gini split. Stops once
/// `max_features` have been examined and a valid split exists; constant features do not
/// count as a valid split, so the search continues past them.
fn best_split(
    x: ArrayView2<'_, f64>,
    y: &[usize],
    rows: &[usize],
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<Candidate> {
    let mut features: Vec<usize> = (0..x.ncols()).collect();
    features.shuffle(rng);

    let mut best: Option<Candidate> = None;
    for (visited, &feature) in features.iter().enumerate() {
        if visited >= params.max_features && best.is_some() {
            break;
        }
        if let Some(c) = best_threshold(x, y, rows, feature, params.n_classes) {
            if best.as_ref().map_or(true, |b| c.impurity < b.impurity) {
                best = Some(c);
            }
        }
    }
    best
}

fn best_threshold(
    x: ArrayView2<'_, f64>,
    y: &[usize],
    rows: &[usize],
    feature: usize,
    n_classes: usize,
) -> Option<Candidate> {
    let mut pairs: Vec<(f64, usize)> = rows.iter().map(|&r| (x[[r, feature]], y[r])).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = pairs.len();
    let mut left = vec![0usize; n_classes];
    let mut right = class_counts(y, rows, n_classes);
    let mut best: Option<Candidate> = None;

    for i in 0..n.saturating_sub(1) {
        let (value, class) = pairs[i];
        left[class] += 1;
        right[class] -= 1;
        let next = pairs[i + 1].0;
        if value == next {
            continue;
        }
        let n_left = i + 1;
        let n_right = n - n_left;
        let impurity = (n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right))
            / n as f64;
        if best.as_ref().map_or(true, |b| impurity < b.impurity) {
            best = Some(Candidate {
                feature,
                threshold: value + (next - value) / 2.0,
                impurity,
            });
        }
    }
    best
}

fn class_counts(y: &[usize], rows: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &r in rows {
        counts[y[r]] += 1;
    }
    counts
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

/// Highest count wins; ties go to the lowest class index.
pub(crate) fn argmax(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}
