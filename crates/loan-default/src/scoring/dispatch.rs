use std::collections::BTreeMap;
use std::sync::Arc;

use super::encoding::{check_columns, FeatureVector, SchemaMismatch, FEATURE_COLUMNS};
use super::models::{DefaultLabel, ModelId, Predictor, UnknownModel};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    UnknownModel(#[from] UnknownModel),
    #[error("model {0} is not loaded")]
    ModelUnavailable(ModelId),
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),
}

/// Routes an encoded row to the requested pretrained classifier.
#[derive(Clone)]
pub struct PredictionDispatcher {
    classifiers: BTreeMap<ModelId, Arc<dyn Predictor>>,
}

impl PredictionDispatcher {
    /// Every classifier must declare the full feature layout, column for column,
    /// and each model may be registered only once.
    pub fn new<I>(classifiers: I) -> Result<Self, SchemaMismatch>
    where
        I: IntoIterator<Item = (ModelId, Arc<dyn Predictor>)>,
    {
        let mut registered = BTreeMap::new();
        for (model, classifier) in classifiers {
            check_columns(model.label(), &FEATURE_COLUMNS, classifier.feature_names())?;
            if registered.insert(model, classifier).is_some() {
                return Err(SchemaMismatch::new(
                    model.label(),
                    "model is registered more than once",
                ));
            }
        }
        Ok(Self {
            classifiers: registered,
        })
    }

    /// Registered models in canonical order.
    pub fn available(&self) -> Vec<ModelId> {
        self.classifiers.keys().copied().collect()
    }

    pub fn contains(&self, model: ModelId) -> bool {
        self.classifiers.contains_key(&model)
    }

    pub fn predict(
        &self,
        vector: &FeatureVector,
        model: ModelId,
    ) -> Result<DefaultLabel, PredictionError> {
        let classifier = self
            .classifiers
            .get(&model)
            .ok_or(PredictionError::ModelUnavailable(model))?;
        check_columns(model.label(), vector.columns(), classifier.feature_names())?;
        Ok(classifier.predict(vector.values())?)
    }

    /// Same as [`predict`](Self::predict) for a model named by string.
    pub fn predict_named(
        &self,
        vector: &FeatureVector,
        model: &str,
    ) -> Result<DefaultLabel, PredictionError> {
        let model: ModelId = model.parse()?;
        self.predict(vector, model)
    }
}
