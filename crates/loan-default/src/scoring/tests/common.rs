use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scoring::{
    ApplicantSubmission, FeatureEncoder, GradientBoosted, LogisticRegression, ModelId, Predictor,
    PredictionDispatcher, RandomForest, ScoringService, StandardScaler, TreeNode,
    FEATURE_COLUMNS, FEATURE_COUNT, NUMERIC_COLUMNS,
};

pub(super) const INTEREST_RATE: usize = 6;
pub(super) const CREDIT_SCORE: usize = 3;
pub(super) const DTI_RATIO: usize = 8;

pub(super) fn feature_names() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|name| name.to_string()).collect()
}

pub(super) fn numeric_names() -> Vec<String> {
    NUMERIC_COLUMNS.iter().map(|name| name.to_string()).collect()
}

/// Leaves raw numerics untouched so assertions can use form values directly.
pub(super) fn identity_scaler() -> StandardScaler {
    StandardScaler::new(numeric_names(), vec![0.0; 9], vec![1.0; 9]).expect("valid scaler")
}

pub(super) fn fitted_scaler() -> StandardScaler {
    StandardScaler::new(
        numeric_names(),
        vec![
            43.5, 82_500.0, 127_500.0, 574.0, 59.5, 2.5, 13.5, 36.0, 0.5,
        ],
        vec![
            15.0, 39_000.0, 70_800.0, 159.0, 34.6, 1.1, 6.6, 17.0, 0.23,
        ],
    )
    .expect("valid scaler")
}

pub(super) fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode<f64> {
    TreeNode::Split {
        feature,
        threshold,
        left,
        right,
    }
}

pub(super) fn leaf(value: f64) -> TreeNode<f64> {
    TreeNode::Leaf { value }
}

/// Predicts default when the interest rate is above 10 percent.
pub(super) fn logistic_model() -> LogisticRegression {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[INTEREST_RATE] = 1.0;
    LogisticRegression::new(feature_names(), coefficients, -10.0).expect("valid model")
}

/// One stump on the interest rate: `rate < 10` leans away from default.
pub(super) fn boosted_model() -> GradientBoosted {
    GradientBoosted::new(
        feature_names(),
        0.5,
        vec![vec![split(INTEREST_RATE, 10.0, 1, 2), leaf(-1.0), leaf(1.0)]],
    )
    .expect("valid model")
}

/// Two trees voting on credit score and debt-to-income ratio.
pub(super) fn forest_model() -> RandomForest {
    RandomForest::new(
        feature_names(),
        vec![
            vec![
                TreeNode::Split {
                    feature: CREDIT_SCORE,
                    threshold: 600.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: [1.0, 3.0] },
                TreeNode::Leaf { value: [4.0, 1.0] },
            ],
            vec![
                TreeNode::Split {
                    feature: DTI_RATIO,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: [3.0, 1.0] },
                TreeNode::Leaf { value: [1.0, 3.0] },
            ],
        ],
    )
    .expect("valid model")
}

pub(super) fn classifiers() -> Vec<(ModelId, Arc<dyn Predictor>)> {
    let logistic: Arc<dyn Predictor> = Arc::new(logistic_model());
    let boosted: Arc<dyn Predictor> = Arc::new(boosted_model());
    let forest: Arc<dyn Predictor> = Arc::new(forest_model());
    vec![
        (ModelId::LogisticRegression, logistic),
        (ModelId::GradientBoosted, boosted),
        (ModelId::RandomForest, forest),
    ]
}

pub(super) fn encoder() -> FeatureEncoder {
    FeatureEncoder::new(Arc::new(identity_scaler())).expect("scaler matches schema")
}

pub(super) fn dispatcher() -> PredictionDispatcher {
    PredictionDispatcher::new(classifiers()).expect("classifiers match schema")
}

pub(super) fn service() -> ScoringService {
    ScoringService::new(encoder(), dispatcher(), ModelId::LogisticRegression)
        .expect("default model registered")
}

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission::default()
}

/// A submission every test model flags as a likely default.
pub(super) fn risky_submission() -> ApplicantSubmission {
    ApplicantSubmission {
        credit_score: 520,
        interest_rate: 18.5,
        dti_ratio: 0.8,
        employment_type: "Unemployed".to_string(),
        ..ApplicantSubmission::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
