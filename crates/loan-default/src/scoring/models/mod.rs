mod boosted;
mod forest;
mod linear;
mod scaler;
mod tree;

pub use boosted::GradientBoosted;
pub use forest::RandomForest;
pub use linear::LogisticRegression;
pub use scaler::{MinMaxScaler, ScalerArtifact, StandardScaler};
pub use tree::TreeNode;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::encoding::SchemaMismatch;

/// Pre-fitted numeric transform applied to the scaled columns.
pub trait Transformer: Send + Sync {
    /// Columns the transform was fitted on, in order.
    fn feature_names(&self) -> &[String];

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, SchemaMismatch>;
}

/// Pretrained binary classifier producing a hard label for a single row.
pub trait Predictor: Send + Sync {
    /// Columns the classifier was trained on, in order.
    fn feature_names(&self) -> &[String];

    fn predict(&self, row: &[f64]) -> Result<DefaultLabel, SchemaMismatch>;
}

/// Structural problem found while building a model from its parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidArtifact(pub String);

/// Identifies one of the three pretrained classifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    LogisticRegression,
    GradientBoosted,
    RandomForest,
}

impl ModelId {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::LogisticRegression,
            Self::GradientBoosted,
            Self::RandomForest,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression",
            Self::GradientBoosted => "gradient_boosted",
            Self::RandomForest => "random_forest",
        }
    }

    /// Name shown in the model picker.
    pub const fn label(self) -> &'static str {
        match self {
            Self::LogisticRegression => "Logistic Regression",
            Self::GradientBoosted => "XGBoost",
            Self::RandomForest => "Random Forest",
        }
    }

    /// File name of the persisted artifact inside the artifact directory.
    pub const fn artifact_file(self) -> &'static str {
        match self {
            Self::LogisticRegression => "logistic_regression.json",
            Self::GradientBoosted => "gradient_boosted.json",
            Self::RandomForest => "random_forest.json",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|model| model.as_str() == raw || model.label() == raw)
            .ok_or_else(|| UnknownModel(raw.to_string()))
    }
}

/// Raised for a model identifier outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown model '{0}' (expected one of: logistic_regression, gradient_boosted, random_forest)"
)]
pub struct UnknownModel(pub String);

/// Hard label produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultLabel {
    NoDefault,
    Default,
}

impl DefaultLabel {
    pub const fn from_positive(positive: bool) -> Self {
        if positive {
            Self::Default
        } else {
            Self::NoDefault
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::NoDefault => 0,
            Self::Default => 1,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NoDefault => "The loan will NOT default.",
            Self::Default => "The loan is likely to default.",
        }
    }
}

pub(crate) fn check_finite(what: &str, values: &[f64]) -> Result<(), InvalidArtifact> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(InvalidArtifact(format!(
            "{what}[{index}] is not a finite number"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn check_len(what: &str, expected: usize, found: usize) -> Result<(), InvalidArtifact> {
    if expected == found {
        Ok(())
    } else {
        Err(InvalidArtifact(format!(
            "{what} has {found} entries but {expected} feature names are declared"
        )))
    }
}
