//! Decision tree ensembles (boosted or bagged).
//!
//! Trees are stored as flat node arrays with node 0 as the root. Every node
//! carries its training cover (sample count or hessian sum), which the
//! attribution code needs to weight the branches a row does not follow.

use serde::{Deserialize, Serialize};

use super::Regressor;
use crate::error::{OracleError, Result};
use crate::explain::tree_shap;

/// One node of a flat tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        cover: f64,
    },
    Leaf {
        value: f64,
        cover: f64,
    },
}

impl TreeNode {
    pub fn cover(&self) -> f64 {
        match self {
            TreeNode::Split { cover, .. } | TreeNode::Leaf { cover, .. } => *cover,
        }
    }
}

/// Comparison used to route a row at a split node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// `x <= threshold` goes left (scikit-learn).
    #[default]
    LessOrEqual,
    /// `x < threshold` goes left (XGBoost, LightGBM).
    Less,
}

impl SplitRule {
    pub fn goes_left(&self, value: f64, threshold: f64) -> bool {
        match self {
            SplitRule::LessOrEqual => value <= threshold,
            SplitRule::Less => value < threshold,
        }
    }
}

/// How per-tree outputs combine into the ensemble output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Gradient boosting: outputs are added.
    #[default]
    Sum,
    /// Random forest: outputs are averaged.
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn validate(&self, n_features: usize, tree_index: usize) -> Result<()> {
        let invalid = |node: usize, what: String| {
            OracleError::InvalidArtifact(format!("tree {} node {}: {}", tree_index, node, what))
        };

        if self.nodes.is_empty() {
            return Err(OracleError::InvalidArtifact(format!(
                "tree {} has no nodes",
                tree_index
            )));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if !(node.cover() > 0.0 && node.cover().is_finite()) {
                return Err(invalid(i, format!("cover must be positive, got {}", node.cover())));
            }
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if feature >= n_features {
                        return Err(invalid(
                            i,
                            format!("split feature {} out of range (n_features = {})", feature, n_features),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(i, "threshold must be finite".to_string()));
                    }
                    // Children after their parent rules out cycles.
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(invalid(i, format!("invalid child index {}", child)));
                        }
                    }
                    if left == right {
                        return Err(invalid(i, "left and right children are the same node".to_string()));
                    }
                }
                TreeNode::Leaf { value, .. } => {
                    if !value.is_finite() {
                        return Err(invalid(i, "leaf value must be finite".to_string()));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64], rule: SplitRule) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value, .. } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    index = if rule.goes_left(x[feature], threshold) {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Cover-weighted mean leaf value, the tree's output with no feature known.
    pub fn expected_value(&self) -> f64 {
        self.expected_value_at(0)
    }

    fn expected_value_at(&self, index: usize) -> f64 {
        match self.nodes[index] {
            TreeNode::Leaf { value, .. } => value,
            TreeNode::Split {
                left, right, cover, ..
            } => {
                let left_weight = self.nodes[left].cover() / cover;
                let right_weight = self.nodes[right].cover() / cover;
                left_weight * self.expected_value_at(left)
                    + right_weight * self.expected_value_at(right)
            }
        }
    }
}

/// A fitted ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub split_rule: SplitRule,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(OracleError::InvalidArtifact(
                "tree ensemble must declare n_features".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(OracleError::InvalidArtifact(
                "tree ensemble has no trees".to_string(),
            ));
        }
        if !self.base_score.is_finite() {
            return Err(OracleError::InvalidArtifact(
                "base_score must be finite".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, i)?;
        }
        Ok(())
    }

    fn tree_weight(&self) -> f64 {
        match self.aggregation {
            Aggregation::Sum => 1.0,
            Aggregation::Mean => 1.0 / self.trees.len() as f64,
        }
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &[f64]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|t| t.predict(x, self.split_rule))
            .sum();
        self.base_score + total * self.tree_weight()
    }

    fn expected_value(&self) -> f64 {
        let total: f64 = self.trees.iter().map(Tree::expected_value).sum();
        self.base_score + total * self.tree_weight()
    }

    /// Path-dependent TreeSHAP values, summed over trees.
    fn contributions(&self, x: &[f64]) -> Vec<f64> {
        let mut phi = vec![0.0; self.n_features];
        for tree in &self.trees {
            tree_shap::accumulate(tree, self.split_rule, x, &mut phi);
        }
        let weight = self.tree_weight();
        phi.iter_mut().for_each(|p| *p *= weight);
        phi
    }
}
