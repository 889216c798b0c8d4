use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{
    Regressor,
    regressor::{check_fit_input, check_predict_input},
};
use crate::{MlErr, Result};

const MIN_SAMPLES_SPLIT: usize = 2;

/// A node of a `RegressionTree`, children are indices into the tree's node arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// The best split found for a node.
struct Split {
    feature: usize,
    threshold: f64,
}

/// A CART regression tree grown by minimizing the squared error of its leaves.
///
/// A row goes to the left child when its value of the split feature is `<= threshold`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    max_depth: Option<usize>,
    n_features: usize,
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Creates a new, unfitted, `RegressionTree`.
    ///
    /// # Arguments
    /// * `max_depth` - The maximum depth of the tree, `None` grows it until the leaves are pure.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            n_features: 0,
            nodes: Vec::new(),
        }
    }

    /// The nodes of the tree, the root being the first one.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], i: usize) -> usize {
            match nodes[i] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_of(nodes, left).max(depth_of(nodes, right))
                }
            }
        }

        if self.nodes.is_empty() {
            0
        } else {
            depth_of(&self.nodes, 0)
        }
    }

    /// Grows the tree over a subset of the rows of `x`.
    ///
    /// # Arguments
    /// * `x` - The features.
    /// * `y` - The targets.
    /// * `rows` - The rows to fit on, may contain repetitions.
    pub fn fit_rows(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        rows: &[usize],
    ) -> Result<()> {
        check_fit_input(x, y)?;
        if rows.is_empty() {
            return Err(MlErr::EmptyDataset {
                what: "tree sample",
            });
        }

        self.n_features = x.ncols();
        self.nodes.clear();
        self.grow(x, y, rows.to_vec(), 0);

        Ok(())
    }

    /// Predicts the target of a single row.
    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => i = if row[feature] <= threshold { left } else { right },
            }
        }
    }

    /// Grows the subtree for `rows` and returns the index of its root.
    fn grow(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        rows: Vec<usize>,
        depth: usize,
    ) -> usize {
        let id = self.nodes.len();
        let sum: f64 = rows.iter().map(|&i| y[i]).sum();
        let value = sum / rows.len() as f64;
        self.nodes.push(Node::Leaf { value });

        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || rows.len() < MIN_SAMPLES_SPLIT {
            return id;
        }

        let Some(Split { feature, threshold }) = best_split(x, y, &rows, sum) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&i| x[[i, feature]] <= threshold);

        let left = self.grow(x, y, left_rows, depth + 1);
        let right = self.grow(x, y, right_rows, depth + 1);
        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };

        id
    }
}

/// Finds the split of `rows` that reduces the squared error the most.
///
/// Minimizing the children's squared error is the same as maximizing
/// `sum_left² / n_left + sum_right² / n_right`. Only strict improvements over the parent
/// are accepted, the first split found wins on ties.
fn best_split(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    rows: &[usize],
    sum: f64,
) -> Option<Split> {
    let n = rows.len();
    let parent = sum * sum / n as f64;
    let mut best_score = parent + parent.abs() * 1e-12;
    let mut best = None;

    let mut order = rows.to_vec();
    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        for k in 0..n - 1 {
            left_sum += y[order[k]];

            let v = x[[order[k], feature]];
            let next = x[[order[k + 1], feature]];
            if v == next {
                continue;
            }

            let nl = (k + 1) as f64;
            let nr = (n - k - 1) as f64;
            let right_sum = sum - left_sum;
            let score = left_sum * left_sum / nl + right_sum * right_sum / nr;

            if score > best_score {
                let mid = v + (next - v) / 2.0;
                best_score = score;
                best = Some(Split {
                    feature,
                    threshold: if mid < next { mid } else { v },
                });
            }
        }
    }

    best
}

impl Regressor for RegressionTree {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        let rows: Vec<usize> = (0..x.nrows()).collect();
        self.fit_rows(x, y, &rows)
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.nodes.is_empty() {
            return Err(MlErr::NotFitted {
                estimator: "RegressionTree",
            });
        }

        check_predict_input(x, self.n_features)?;
        Ok(x.rows().into_iter().map(|row| self.predict_row(row)).collect())
    }
}
