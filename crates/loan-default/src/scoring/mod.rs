//! Loan default scoring: applicant validation, feature encoding, and dispatch
//! to one of the pretrained classifiers.
//!
//! The encoder and dispatcher are pure; artifacts are loaded once by
//! [`ArtifactStore`] and shared read-only by every request.

pub mod artifacts;
pub mod dispatch;
pub mod domain;
pub mod encoding;
pub mod models;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use artifacts::{ArtifactBundle, ArtifactError, ArtifactStore, SCALER_FILE};
pub use dispatch::{PredictionDispatcher, PredictionError};
pub use domain::{
    answer_is_yes, ApplicantRecord, ApplicantSubmission, Categorical, Education, EmploymentType,
    LoanPurpose, MaritalStatus,
};
pub use encoding::{
    EncodingError, FeatureEncoder, FeatureSegment, FeatureVector, SchemaMismatch,
    FEATURE_COLUMNS, FEATURE_COUNT, NUMERIC_COLUMNS, NUMERIC_FEATURE_COUNT,
};
pub use models::{
    DefaultLabel, GradientBoosted, InvalidArtifact, LogisticRegression, MinMaxScaler, ModelId,
    Predictor, RandomForest, ScalerArtifact, StandardScaler, Transformer, TreeNode, UnknownModel,
};
pub use router::{error_status, scoring_router, PredictionRequest, PredictionResponse};
pub use service::{Assessment, ModelSummary, ScoringError, ScoringService};
