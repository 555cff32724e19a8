//! Random Forest Classifier
//!
//! Binary classifier built from bootstrapped CART trees (Gini impurity,
//! random feature subset per split). `predict_proba` averages the
//! positive-class fraction of the leaf each tree lands in.
//!
//! Trees are stored as flat node arenas: children always sit at a higher
//! index than their parent, which keeps traversal bounded and lets a tree
//! loaded from disk be checked structurally before use.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::inference::RiskModel;
use super::ModelError;

// ============================================================================
// PARAMETERS
// ============================================================================

pub const DEFAULT_TREES: usize = 100;
pub const DEFAULT_MAX_DEPTH: usize = 16;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features tried per split; `None` = sqrt(n_features)
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREES,
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: DEFAULT_SEED,
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { positive_fraction }) => return Ok(*positive_fraction),
                Some(Node::Split { feature, threshold, left, right }) => {
                    let value = row
                        .get(*feature)
                        .ok_or_else(|| ModelError::Corrupt(format!("split on missing feature {}", feature)))?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                None => return Err(ModelError::Corrupt(format!("dangling node index {}", index))),
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match nodes.get(index) {
                Some(Node::Split { left, right, .. }) => 1 + walk(nodes, *left).max(walk(nodes, *right)),
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }

    fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Corrupt("empty tree".to_string()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { positive_fraction } => {
                    if !(0.0..=1.0).contains(positive_fraction) {
                        return Err(ModelError::Corrupt(format!("leaf {} fraction out of range", index)));
                    }
                }
                Node::Split { feature, threshold, left, right } => {
                    let in_bounds = |child: usize| child > index && child < self.nodes.len();
                    if *feature >= n_features || !threshold.is_finite() || !in_bounds(*left) || !in_bounds(*right) {
                        return Err(ModelError::Corrupt(format!("invalid split at node {}", index)));
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// TREE BUILDER
// ============================================================================

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

struct TreeBuilder<'a> {
    x: ArrayView2<'a, f64>,
    y: &'a [u8],
    params: &'a ForestParams,
    max_features: usize,
    rng: StdRng,
    nodes: Vec<Node>,
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let index = self.nodes.len();
        let positives = samples.iter().filter(|&&i| self.y[i] == 1).count();
        let fraction = positives as f64 / samples.len() as f64;
        self.nodes.push(Node::Leaf { positive_fraction: fraction });

        let pure = positives == 0 || positives == samples.len();
        if pure || depth >= self.params.max_depth || samples.len() < self.params.min_samples_split {
            return index;
        }

        let Some(split) = self.best_split(samples) else {
            return index;
        };

        // Partition in place: left block = value <= threshold
        let mut mid = 0;
        for k in 0..samples.len() {
            if self.x[[samples[k], split.feature]] <= split.threshold {
                samples.swap(k, mid);
                mid += 1;
            }
        }

        let (left_samples, right_samples) = samples.split_at_mut(mid);
        let left = self.build(left_samples, depth + 1);
        let right = self.build(right_samples, depth + 1);

        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn best_split(&mut self, samples: &[usize]) -> Option<BestSplit> {
        let n_features = self.x.ncols();
        let candidates = rand::seq::index::sample(&mut self.rng, n_features, self.max_features).into_vec();
        let min_leaf = self.params.min_samples_leaf.max(1);
        let total = samples.len();
        let total_pos = samples.iter().filter(|&&i| self.y[i] == 1).count();

        let mut best: Option<BestSplit> = None;
        let mut column: Vec<(f64, u8)> = Vec::with_capacity(total);

        for feature in candidates {
            column.clear();
            column.extend(samples.iter().map(|&i| (self.x[[i, feature]], self.y[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_pos = 0usize;
            for k in 0..total - 1 {
                left_pos += usize::from(column[k].1 == 1);
                if column[k].0 == column[k + 1].0 {
                    continue;
                }

                let left_n = k + 1;
                let right_n = total - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }

                let impurity = (left_n as f64 * gini(left_pos, left_n)
                    + right_n as f64 * gini(total_pos - left_pos, right_n))
                    / total as f64;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(BestSplit {
                        feature,
                        threshold: column[k].0 + (column[k + 1].0 - column[k].0) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on scaled rows (samples × features) against 0/1 labels
    pub fn fit<'a>(x: ArrayView2<'a, f64>, y: &'a [u8], params: &'a ForestParams) -> Result<Self, ModelError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples == 0 || n_features == 0 || params.n_trees == 0 {
            return Err(ModelError::EmptyInput);
        }
        if y.len() != n_samples {
            return Err(ModelError::LabelMismatch { rows: n_samples, labels: y.len() });
        }
        if y.iter().any(|&label| label > 1) {
            return Err(ModelError::Corrupt("labels must be 0 or 1".to_string()));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("forest training data"));
        }

        let max_features = params
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().round() as usize)
            .clamp(1, n_features);

        let trees = (0..params.n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let mut bootstrap: Vec<usize> = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();

                let mut builder = TreeBuilder {
                    x,
                    y,
                    params,
                    max_features,
                    rng,
                    nodes: Vec::new(),
                };
                builder.build(&mut bootstrap, 0);
                DecisionTree { nodes: builder.nodes }
            })
            .collect();

        Ok(Self { n_features, trees })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }

    /// Structural check for forests read from disk
    pub fn validate(&self, expected_features: usize) -> Result<(), ModelError> {
        if self.n_features != expected_features {
            return Err(ModelError::DimensionMismatch {
                expected: expected_features,
                actual: self.n_features,
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::Corrupt("forest has no trees".to_string()));
        }
        self.trees.iter().try_for_each(|tree| tree.validate(self.n_features))
    }
}

impl RiskModel for RandomForest {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::Corrupt("forest has no trees".to_string()));
        }

        let sum = self
            .trees
            .iter()
            .map(|tree| tree.predict_proba(features))
            .sum::<Result<f64, ModelError>>()?;

        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}
