use serde::Deserialize;

use super::tree::{DecisionTree, SplitRule, TreeNode};
use super::{check_finite, DefaultLabel, InvalidArtifact, Predictor};
use crate::scoring::encoding::{ensure_width, SchemaMismatch};

/// Gradient-boosted tree ensemble with a logistic objective.
///
/// The raw margin is `logit(base_score)` plus the sum of one leaf per tree;
/// default is predicted when the resulting probability exceeds one half.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "GradientBoostedDocument")]
pub struct GradientBoosted {
    feature_names: Vec<String>,
    base_margin: f64,
    trees: Vec<DecisionTree<f64>>,
}

#[derive(Deserialize)]
struct GradientBoostedDocument {
    feature_names: Vec<String>,
    #[serde(default = "default_base_score")]
    base_score: f64,
    trees: Vec<Vec<TreeNode<f64>>>,
}

fn default_base_score() -> f64 {
    0.5
}

impl TryFrom<GradientBoostedDocument> for GradientBoosted {
    type Error = InvalidArtifact;

    fn try_from(document: GradientBoostedDocument) -> Result<Self, Self::Error> {
        Self::new(document.feature_names, document.base_score, document.trees)
    }
}

impl GradientBoosted {
    pub fn new(
        feature_names: Vec<String>,
        base_score: f64,
        trees: Vec<Vec<TreeNode<f64>>>,
    ) -> Result<Self, InvalidArtifact> {
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(InvalidArtifact(format!(
                "base_score {base_score} must lie strictly between 0 and 1"
            )));
        }
        if trees.is_empty() {
            return Err(InvalidArtifact("ensemble has no trees".to_string()));
        }

        let feature_count = feature_names.len();
        let trees = trees
            .into_iter()
            .enumerate()
            .map(|(index, nodes)| {
                DecisionTree::new(nodes, feature_count, |value| {
                    check_finite("leaf value", std::slice::from_ref(value))
                })
                .map_err(|err| InvalidArtifact(format!("tree {index}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            feature_names,
            base_margin: (base_score / (1.0 - base_score)).ln(),
            trees,
        })
    }

    pub(crate) fn margin(&self, row: &[f64]) -> f64 {
        self.trees.iter().fold(self.base_margin, |acc, tree| {
            acc + tree.leaf(row, SplitRule::LessThan)
        })
    }

    pub(crate) fn probability(&self, row: &[f64]) -> f64 {
        1.0 / (1.0 + (-self.margin(row)).exp())
    }
}

impl Predictor for GradientBoosted {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<DefaultLabel, SchemaMismatch> {
        ensure_width("gradient boosted ensemble", self.feature_names.len(), row.len())?;
        Ok(DefaultLabel::from_positive(self.probability(row) > 0.5))
    }
}
