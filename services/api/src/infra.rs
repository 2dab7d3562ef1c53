use loan_default::error::AppError;
use loan_default::scoring::{ArtifactStore, ModelId, ScoringService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load every artifact from `artifact_dir` and wire the scoring service.
pub(crate) fn load_scoring_service(
    artifact_dir: &Path,
    default_model: ModelId,
) -> Result<Arc<ScoringService>, AppError> {
    let bundle = ArtifactStore::from_dir(artifact_dir)?;
    let service = ScoringService::from_bundle(&bundle, default_model)?;

    info!(
        artifact_dir = %artifact_dir.display(),
        models = bundle.classifiers.len(),
        default_model = default_model.as_str(),
        "scoring artifacts loaded"
    );

    Ok(Arc::new(service))
}

pub(crate) fn parse_model(raw: &str) -> Result<ModelId, String> {
    raw.parse::<ModelId>().map_err(|err| err.to_string())
}
