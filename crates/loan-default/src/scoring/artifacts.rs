use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::dispatch::PredictionDispatcher;
use super::encoding::{FeatureEncoder, SchemaMismatch};
use super::models::{
    GradientBoosted, LogisticRegression, ModelId, Predictor, RandomForest, ScalerArtifact,
    Transformer,
};

/// File name of the persisted scaler inside the artifact directory.
pub const SCALER_FILE: &str = "scaler.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
}

/// The scaler and classifiers loaded once at startup and shared read-only.
#[derive(Clone)]
pub struct ArtifactBundle {
    pub scaler: Arc<dyn Transformer>,
    pub classifiers: Vec<(ModelId, Arc<dyn Predictor>)>,
}

impl ArtifactBundle {
    pub fn encoder(&self) -> Result<FeatureEncoder, SchemaMismatch> {
        FeatureEncoder::new(self.scaler.clone())
    }

    pub fn dispatcher(&self) -> Result<PredictionDispatcher, SchemaMismatch> {
        PredictionDispatcher::new(self.classifiers.iter().cloned())
    }
}

/// Reads persisted artifacts from JSON documents.
pub struct ArtifactStore;

impl ArtifactStore {
    /// Load `scaler.json` plus one document per model from `dir`.
    ///
    /// Every artifact is checked against the feature schema before returning,
    /// so a bundle that loads is safe to serve.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<ArtifactBundle, ArtifactError> {
        let dir = dir.as_ref();

        let scaler: ScalerArtifact = read_document(&dir.join(SCALER_FILE))?;
        let scaler: Arc<dyn Transformer> = Arc::new(scaler);

        let classifiers = ModelId::ordered()
            .into_iter()
            .map(|model| {
                let path = dir.join(model.artifact_file());
                let file = open(&path)?;
                let classifier = Self::classifier_from_reader(model, BufReader::new(file))
                    .map_err(|source| ArtifactError::Parse { path, source })?;
                Ok((model, classifier))
            })
            .collect::<Result<Vec<_>, ArtifactError>>()?;

        let bundle = ArtifactBundle {
            scaler,
            classifiers,
        };
        bundle.encoder()?;
        bundle.dispatcher()?;
        Ok(bundle)
    }

    pub fn scaler_from_reader<R: Read>(reader: R) -> Result<ScalerArtifact, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn classifier_from_reader<R: Read>(
        model: ModelId,
        reader: R,
    ) -> Result<Arc<dyn Predictor>, serde_json::Error> {
        let classifier: Arc<dyn Predictor> = match model {
            ModelId::LogisticRegression => {
                Arc::new(serde_json::from_reader::<_, LogisticRegression>(reader)?)
            }
            ModelId::GradientBoosted => {
                Arc::new(serde_json::from_reader::<_, GradientBoosted>(reader)?)
            }
            ModelId::RandomForest => Arc::new(serde_json::from_reader::<_, RandomForest>(reader)?),
        };
        Ok(classifier)
    }
}

fn open(path: &Path) -> Result<File, ArtifactError> {
    File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
