use serde::{Deserialize, Serialize};

use super::InvalidArtifact;

/// Node of a flattened decision tree. The root is node 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode<L> {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: L,
    },
}

/// Which side of the threshold a value equal to it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SplitRule {
    /// XGBoost: `x < threshold` goes left.
    LessThan,
    /// scikit-learn: `x <= threshold` goes left.
    LessOrEqual,
}

impl SplitRule {
    fn goes_left(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::LessThan => value < threshold,
            Self::LessOrEqual => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecisionTree<L> {
    nodes: Vec<TreeNode<L>>,
}

impl<L> DecisionTree<L> {
    /// Every child index must point past its parent, so traversal always ends on a leaf.
    pub(crate) fn new<F>(
        nodes: Vec<TreeNode<L>>,
        feature_count: usize,
        check_leaf: F,
    ) -> Result<Self, InvalidArtifact>
    where
        F: Fn(&L) -> Result<(), InvalidArtifact>,
    {
        if nodes.is_empty() {
            return Err(InvalidArtifact("tree has no nodes".to_string()));
        }

        for (index, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= feature_count {
                        return Err(InvalidArtifact(format!(
                            "node {index} splits on feature {feature} but only {feature_count} features exist"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(InvalidArtifact(format!(
                            "node {index} has a non-finite threshold"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= nodes.len() {
                            return Err(InvalidArtifact(format!(
                                "node {index} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => check_leaf(value)
                    .map_err(|err| InvalidArtifact(format!("leaf {index}: {err}")))?,
            }
        }

        Ok(Self { nodes })
    }

    /// Caller guarantees `row` is as wide as the declared feature count.
    pub(crate) fn leaf(&self, row: &[f64], rule: SplitRule) -> &L {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if rule.goes_left(row[*feature], *threshold) {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}
