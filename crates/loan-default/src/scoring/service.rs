use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::artifacts::ArtifactBundle;
use super::dispatch::{PredictionDispatcher, PredictionError};
use super::domain::ApplicantSubmission;
use super::encoding::{
    EncodingError, FeatureEncoder, FeatureVector, SchemaMismatch, FEATURE_COLUMNS,
    NUMERIC_COLUMNS,
};
use super::models::{DefaultLabel, ModelId};

/// Service composing the feature encoder and the classifier dispatcher.
pub struct ScoringService {
    encoder: FeatureEncoder,
    dispatcher: PredictionDispatcher,
    default_model: ModelId,
}

impl ScoringService {
    pub fn new(
        encoder: FeatureEncoder,
        dispatcher: PredictionDispatcher,
        default_model: ModelId,
    ) -> Result<Self, ScoringError> {
        if !dispatcher.contains(default_model) {
            return Err(PredictionError::ModelUnavailable(default_model).into());
        }

        Ok(Self {
            encoder,
            dispatcher,
            default_model,
        })
    }

    pub fn from_bundle(
        bundle: &ArtifactBundle,
        default_model: ModelId,
    ) -> Result<Self, ScoringError> {
        Self::new(bundle.encoder()?, bundle.dispatcher()?, default_model)
    }

    pub fn default_model(&self) -> ModelId {
        self.default_model
    }

    /// Encode a submission and run it through the requested (or default) model.
    pub fn assess(
        &self,
        submission: &ApplicantSubmission,
        model: Option<&str>,
    ) -> Result<Assessment, ScoringError> {
        let model = match model {
            Some(raw) => raw.parse::<ModelId>().map_err(|err| {
                warn!(requested = raw, "rejected prediction for unknown model");
                PredictionError::from(err)
            })?,
            None => self.default_model,
        };

        let features = self.encoder.encode_submission(submission).map_err(|err| {
            warn!(error = %err, "rejected applicant submission");
            err
        })?;
        let label = self.dispatcher.predict(&features, model)?;

        info!(
            model = model.as_str(),
            label = label.as_u8(),
            "loan default prediction complete"
        );

        Ok(Assessment {
            model,
            label,
            features,
            evaluated_at: Utc::now(),
        })
    }

    /// Encoded column names in model order.
    pub fn schema(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn numeric_schema(&self) -> &'static [&'static str] {
        &NUMERIC_COLUMNS
    }

    pub fn models(&self) -> Vec<ModelSummary> {
        self.dispatcher
            .available()
            .into_iter()
            .map(|model| ModelSummary {
                id: model,
                label: model.label(),
                default: model == self.default_model,
            })
            .collect()
    }
}

/// Outcome of a single prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub model: ModelId,
    pub label: DefaultLabel,
    pub features: FeatureVector,
    pub evaluated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn message(&self) -> &'static str {
        self.label.message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub id: ModelId,
    pub label: &'static str,
    pub default: bool,
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
}
