use serde::Deserialize;

use super::tree::{DecisionTree, SplitRule, TreeNode};
use super::{check_finite, DefaultLabel, InvalidArtifact, Predictor};
use crate::scoring::encoding::{ensure_width, SchemaMismatch};

/// Random forest voting by averaged per-tree class distributions.
///
/// Leaves carry `[no_default, default]` weights (counts or fractions). Ties
/// resolve to no default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RandomForestDocument")]
pub struct RandomForest {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree<[f64; 2]>>,
}

#[derive(Deserialize)]
struct RandomForestDocument {
    feature_names: Vec<String>,
    trees: Vec<Vec<TreeNode<[f64; 2]>>>,
}

impl TryFrom<RandomForestDocument> for RandomForest {
    type Error = InvalidArtifact;

    fn try_from(document: RandomForestDocument) -> Result<Self, Self::Error> {
        Self::new(document.feature_names, document.trees)
    }
}

impl RandomForest {
    pub fn new(
        feature_names: Vec<String>,
        trees: Vec<Vec<TreeNode<[f64; 2]>>>,
    ) -> Result<Self, InvalidArtifact> {
        if trees.is_empty() {
            return Err(InvalidArtifact("forest has no trees".to_string()));
        }

        let feature_count = feature_names.len();
        let trees = trees
            .into_iter()
            .enumerate()
            .map(|(index, nodes)| {
                DecisionTree::new(nodes, feature_count, check_class_weights)
                    .map_err(|err| InvalidArtifact(format!("tree {index}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            feature_names,
            trees,
        })
    }

    /// Mean class distribution across trees.
    pub(crate) fn class_distribution(&self, row: &[f64]) -> [f64; 2] {
        let mut totals = [0.0, 0.0];
        for tree in &self.trees {
            let [no_default, default] = *tree.leaf(row, SplitRule::LessOrEqual);
            let weight = no_default + default;
            totals[0] += no_default / weight;
            totals[1] += default / weight;
        }
        let count = self.trees.len() as f64;
        [totals[0] / count, totals[1] / count]
    }
}

fn check_class_weights(weights: &[f64; 2]) -> Result<(), InvalidArtifact> {
    check_finite("class weights", weights)?;
    if weights.iter().any(|weight| *weight < 0.0) || weights[0] + weights[1] <= 0.0 {
        return Err(InvalidArtifact(
            "class weights must be non-negative with a positive total".to_string(),
        ));
    }
    Ok(())
}

impl Predictor for RandomForest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<DefaultLabel, SchemaMismatch> {
        ensure_width("random forest", self.feature_names.len(), row.len())?;
        let [no_default, default] = self.class_distribution(row);
        Ok(DefaultLabel::from_positive(default > no_default))
    }
}
