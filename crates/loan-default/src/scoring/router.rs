use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::dispatch::PredictionError;
use super::domain::ApplicantSubmission;
use super::encoding::{EncodingError, FeatureVector};
use super::models::{DefaultLabel, ModelId};
use super::service::{Assessment, ScoringError, ScoringService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub applicant: ApplicantSubmission,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub include_features: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub model: ModelId,
    pub model_label: &'static str,
    pub label: u8,
    pub outcome: DefaultLabel,
    pub message: &'static str,
    pub evaluated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
}

impl PredictionResponse {
    pub fn from_assessment(assessment: Assessment, include_features: bool) -> Self {
        Self {
            model: assessment.model,
            model_label: assessment.model.label(),
            label: assessment.label.as_u8(),
            outcome: assessment.label,
            message: assessment.message(),
            evaluated_at: assessment.evaluated_at,
            features: include_features.then_some(assessment.features),
        }
    }
}

/// Router builder exposing the prediction, model listing, and schema endpoints.
pub fn scoring_router(service: Arc<ScoringService>) -> Router {
    Router::new()
        .route("/api/v1/predictions", post(predict_handler))
        .route("/api/v1/models", get(models_handler))
        .route("/api/v1/schema", get(schema_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<ScoringService>>,
    axum::Json(request): axum::Json<PredictionRequest>,
) -> Response {
    match service.assess(&request.applicant, request.model.as_deref()) {
        Ok(assessment) => {
            let body = PredictionResponse::from_assessment(assessment, request.include_features);
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (error_status(&error), axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn models_handler(State(service): State<Arc<ScoringService>>) -> Response {
    let payload = json!({
        "default": service.default_model(),
        "models": service.models(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn schema_handler(State(service): State<Arc<ScoringService>>) -> Response {
    let payload = json!({
        "columns": service.schema(),
        "numeric_columns": service.numeric_schema(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

/// HTTP status for a failed prediction.
pub fn error_status(error: &ScoringError) -> StatusCode {
    match error {
        ScoringError::Encoding(EncodingError::SchemaMismatch(_))
        | ScoringError::Prediction(PredictionError::SchemaMismatch(_))
        | ScoringError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ScoringError::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringError::Prediction(_) => StatusCode::BAD_REQUEST,
    }
}
