use serde::Deserialize;

use super::{check_finite, check_len, InvalidArtifact, Transformer};
use crate::scoring::encoding::{ensure_width, SchemaMismatch};

/// Persisted scaler, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl Transformer for ScalerArtifact {
    fn feature_names(&self) -> &[String] {
        match self {
            Self::Standard(scaler) => scaler.feature_names(),
            Self::MinMax(scaler) => scaler.feature_names(),
        }
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, SchemaMismatch> {
        match self {
            Self::Standard(scaler) => scaler.transform(values),
            Self::MinMax(scaler) => scaler.transform(values),
        }
    }
}

/// Standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "StandardScalerDocument")]
pub struct StandardScaler {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct StandardScalerDocument {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<StandardScalerDocument> for StandardScaler {
    type Error = InvalidArtifact;

    fn try_from(document: StandardScalerDocument) -> Result<Self, Self::Error> {
        Self::new(document.feature_names, document.mean, document.scale)
    }
}

impl StandardScaler {
    pub fn new(
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    ) -> Result<Self, InvalidArtifact> {
        check_len("mean", feature_names.len(), mean.len())?;
        check_len("scale", feature_names.len(), scale.len())?;
        check_finite("mean", &mean)?;
        check_finite("scale", &scale)?;

        // Constant columns were fitted with a zero spread; divide by one instead.
        let scale = scale
            .into_iter()
            .map(|value| if value == 0.0 { 1.0 } else { value })
            .collect();

        Ok(Self {
            feature_names,
            mean,
            scale,
        })
    }
}

impl Transformer for StandardScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, SchemaMismatch> {
        ensure_width("standard scaler", self.mean.len(), values.len())?;
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }
}

/// Min-max scaling onto `feature_range`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "MinMaxScalerDocument")]
pub struct MinMaxScaler {
    feature_names: Vec<String>,
    data_min: Vec<f64>,
    data_range: Vec<f64>,
    feature_range: (f64, f64),
}

#[derive(Deserialize)]
struct MinMaxScalerDocument {
    feature_names: Vec<String>,
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    #[serde(default = "unit_range")]
    feature_range: (f64, f64),
}

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl TryFrom<MinMaxScalerDocument> for MinMaxScaler {
    type Error = InvalidArtifact;

    fn try_from(document: MinMaxScalerDocument) -> Result<Self, Self::Error> {
        Self::new(
            document.feature_names,
            document.data_min,
            document.data_max,
            document.feature_range,
        )
    }
}

impl MinMaxScaler {
    pub fn new(
        feature_names: Vec<String>,
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        feature_range: (f64, f64),
    ) -> Result<Self, InvalidArtifact> {
        check_len("data_min", feature_names.len(), data_min.len())?;
        check_len("data_max", feature_names.len(), data_max.len())?;
        check_finite("data_min", &data_min)?;
        check_finite("data_max", &data_max)?;
        check_finite("feature_range", &[feature_range.0, feature_range.1])?;
        if feature_range.0 >= feature_range.1 {
            return Err(InvalidArtifact(format!(
                "feature_range ({}, {}) must be increasing",
                feature_range.0, feature_range.1
            )));
        }

        let data_range = data_min
            .iter()
            .zip(&data_max)
            .map(|(min, max)| {
                let range = max - min;
                if range == 0.0 {
                    1.0
                } else {
                    range
                }
            })
            .collect();

        Ok(Self {
            feature_names,
            data_min,
            data_range,
            feature_range,
        })
    }
}

impl Transformer for MinMaxScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, values: &[f64]) -> Result<Vec<f64>, SchemaMismatch> {
        ensure_width("min-max scaler", self.data_min.len(), values.len())?;
        let (low, high) = self.feature_range;
        Ok(values
            .iter()
            .zip(self.data_min.iter().zip(&self.data_range))
            .map(|(value, (min, range))| (value - min) / range * (high - low) + low)
            .collect())
    }
}
