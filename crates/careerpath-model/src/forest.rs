//! Random forest of flattened decision trees.
//!
//! Each tree is stored the way tree learners export them: parallel arrays
//! indexed by node id, with `-1` marking a leaf's missing children. A
//! sample goes left when `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::classifier::{check_width, Classifier};
use crate::error::{ArtifactError, ClassifierError};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights (counts or fractions), one row per node
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<(), ArtifactError> {
        let n = self.node_count();
        let invalid = |msg: String| ArtifactError::Invalid(format!("tree {}: {}", index, msg));

        if n == 0 {
            return Err(invalid("has no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if (left == LEAF) != (right == LEAF) {
                return Err(invalid(format!("node {} has exactly one child", node)));
            }
            if left != LEAF {
                // Children always come after their parent, which also rules out cycles.
                for child in [left, right] {
                    if child <= node as i64 || child >= n as i64 {
                        return Err(invalid(format!("node {} has child {} out of range", node, child)));
                    }
                }
                let f = self.feature[node];
                if f < 0 || f as usize >= n_features {
                    return Err(invalid(format!("node {} splits on feature {}", node, f)));
                }
            }
            if self.value[node].len() != n_classes {
                return Err(invalid(format!(
                    "node {} has {} class weights for {} classes",
                    node,
                    self.value[node].len(),
                    n_classes
                )));
            }
            if self.value[node].iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(invalid(format!(
                    "node {} has a negative or non-finite class weight",
                    node
                )));
            }
        }
        Ok(())
    }

    /// Index of the leaf `x` falls into, or `None` if the walk does not terminate.
    fn leaf_for(&self, x: &[f64]) -> Option<usize> {
        let mut node = 0usize;
        for _ in 0..self.node_count() {
            let left = *self.children_left.get(node)?;
            if left == LEAF {
                return Some(node);
            }
            let f = usize::try_from(*self.feature.get(node)?).ok()?;
            node = if *x.get(f)? <= *self.threshold.get(node)? {
                usize::try_from(left).ok()?
            } else {
                usize::try_from(*self.children_right.get(node)?).ok()?
            };
        }
        None
    }
}

/// Fitted random forest; probabilities are the mean of per-tree leaf distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid("random forest has no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid("random forest has no trees".to_string()));
        }
        if self.n_features == 0 {
            return Err(ArtifactError::Invalid("random forest has zero features".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features, self.classes.len())?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_width(self.n_features, features)?;
        let mut proba = vec![0.0; self.classes.len()];

        for (i, tree) in self.trees.iter().enumerate() {
            let leaf = tree
                .leaf_for(features)
                .ok_or(ClassifierError::MalformedTree { tree: i })?;
            let weights = &tree.value[leaf];
            let total: f64 = weights.iter().sum();
            if total <= 0.0 || !total.is_finite() {
                return Err(ClassifierError::MalformedTree { tree: i });
            }
            for (p, w) in proba.iter_mut().zip(weights) {
                *p += w / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(proba.into_iter().map(|p| p / n_trees).collect())
    }
}
