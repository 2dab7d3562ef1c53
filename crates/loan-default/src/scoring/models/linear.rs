use serde::Deserialize;

use super::{check_finite, check_len, DefaultLabel, InvalidArtifact, Predictor};
use crate::scoring::encoding::{ensure_width, SchemaMismatch};

/// Binary logistic regression; predicts default when the decision value is positive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LogisticRegressionDocument")]
pub struct LogisticRegression {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Deserialize)]
struct LogisticRegressionDocument {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<LogisticRegressionDocument> for LogisticRegression {
    type Error = InvalidArtifact;

    fn try_from(document: LogisticRegressionDocument) -> Result<Self, Self::Error> {
        Self::new(
            document.feature_names,
            document.coefficients,
            document.intercept,
        )
    }
}

impl LogisticRegression {
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, InvalidArtifact> {
        check_len("coefficients", feature_names.len(), coefficients.len())?;
        check_finite("coefficients", &coefficients)?;
        check_finite("intercept", &[intercept])?;
        Ok(Self {
            feature_names,
            coefficients,
            intercept,
        })
    }

    pub(crate) fn decision_value(&self, row: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(row)
            .fold(self.intercept, |acc, (coefficient, value)| {
                acc + coefficient * value
            })
    }
}

impl Predictor for LogisticRegression {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> Result<DefaultLabel, SchemaMismatch> {
        ensure_width("logistic regression", self.coefficients.len(), row.len())?;
        Ok(DefaultLabel::from_positive(self.decision_value(row) > 0.0))
    }
}
