use super::common::*;

use crate::scoring::models::{Predictor, Transformer};
use crate::scoring::{
    DefaultLabel, GradientBoosted, MinMaxScaler, ModelId, RandomForest, ScalerArtifact,
    StandardScaler, TreeNode, UnknownModel, FEATURE_COUNT,
};

fn row_with(index: usize, value: f64) -> Vec<f64> {
    let mut row = vec![0.0; FEATURE_COUNT];
    row[index] = value;
    row
}

#[test]
fn standard_scaler_centers_and_scales() {
    let scaler = StandardScaler::new(
        vec!["a".to_string(), "b".to_string()],
        vec![10.0, 5.0],
        vec![2.0, 0.0],
    )
    .expect("valid scaler");

    let scaled = scaler.transform(&[14.0, 7.0]).expect("two values");

    assert_eq!(scaled, vec![2.0, 2.0], "zero scale divides by one");
}

#[test]
fn min_max_scaler_maps_onto_feature_range() {
    let scaler = MinMaxScaler::new(
        vec!["a".to_string(), "b".to_string()],
        vec![0.0, 3.0],
        vec![200.0, 3.0],
        (-1.0, 1.0),
    )
    .expect("valid scaler");

    let scaled = scaler.transform(&[50.0, 3.0]).expect("two values");

    assert_eq!(scaled, vec![-0.5, -1.0]);
}

#[test]
fn scaler_rejects_rows_of_the_wrong_width() {
    let err = identity_scaler()
        .transform(&[1.0, 2.0])
        .expect_err("width mismatch");

    assert!(err.detail.contains("expected a row of 9 values, received 2"));
}

#[test]
fn scaler_documents_are_tagged_by_kind() {
    let standard = r#"{"kind":"standard","feature_names":["a"],"mean":[1.0],"scale":[2.0]}"#;
    let min_max = r#"{"kind":"min_max","feature_names":["a"],"data_min":[0.0],"data_max":[4.0]}"#;

    let standard: ScalerArtifact = serde_json::from_str(standard).expect("standard parses");
    let min_max: ScalerArtifact = serde_json::from_str(min_max).expect("min-max parses");

    assert!(matches!(standard, ScalerArtifact::Standard(_)));
    assert_eq!(standard.transform(&[5.0]).expect("one value"), vec![2.0]);
    assert_eq!(min_max.transform(&[1.0]).expect("one value"), vec![0.25]);
}

#[test]
fn scaler_documents_with_mismatched_lengths_fail_to_parse() {
    let document = r#"{"kind":"standard","feature_names":["a","b"],"mean":[1.0],"scale":[2.0,1.0]}"#;

    let err = serde_json::from_str::<ScalerArtifact>(document).expect_err("length mismatch");

    assert!(err.to_string().contains("mean has 1 entries"));
}

#[test]
fn logistic_regression_predicts_default_on_positive_decision_value() {
    let model = logistic_model();

    assert_eq!(
        model.predict(&row_with(INTEREST_RATE, 12.0)).expect("full row"),
        DefaultLabel::Default
    );
    assert_eq!(
        model.predict(&row_with(INTEREST_RATE, 10.0)).expect("full row"),
        DefaultLabel::NoDefault,
        "a zero decision value is not a default"
    );
}

#[test]
fn classifiers_reject_short_rows() {
    let err = logistic_model().predict(&[1.0; 5]).expect_err("short row");

    assert_eq!(err.artifact, "logistic regression");
}

#[test]
fn boosted_split_sends_threshold_values_right() {
    let model = boosted_model();

    assert_eq!(
        model.predict(&row_with(INTEREST_RATE, 9.99)).expect("full row"),
        DefaultLabel::NoDefault
    );
    assert_eq!(
        model.predict(&row_with(INTEREST_RATE, 10.0)).expect("full row"),
        DefaultLabel::Default
    );
}

#[test]
fn boosted_base_score_shifts_the_margin() {
    let model = GradientBoosted::new(
        feature_names(),
        0.9,
        vec![vec![split(INTEREST_RATE, 10.0, 1, 2), leaf(-1.0), leaf(1.0)]],
    )
    .expect("valid model");

    // logit(0.9) is about 2.197, which outweighs the -1.0 leaf.
    let row = row_with(INTEREST_RATE, 4.5);
    assert!((model.margin(&row) - 1.197).abs() < 1e-3);
    assert!(model.probability(&row) > 0.5);
    assert_eq!(model.predict(&row).expect("full row"), DefaultLabel::Default);
}

#[test]
fn boosted_rejects_degenerate_base_score() {
    let err = GradientBoosted::new(feature_names(), 1.0, vec![vec![leaf(0.0)]])
        .expect_err("base score of one");

    assert!(err.0.contains("base_score"));
}

#[test]
fn forest_ties_resolve_to_no_default() {
    let model = forest_model();
    let mut row = row_with(CREDIT_SCORE, 550.0);
    row[DTI_RATIO] = 0.25;

    assert_eq!(model.class_distribution(&row), [0.5, 0.5]);
    assert_eq!(model.predict(&row).expect("full row"), DefaultLabel::NoDefault);
}

#[test]
fn forest_split_keeps_threshold_values_left() {
    let model = forest_model();
    let mut row = row_with(CREDIT_SCORE, 600.0);
    row[DTI_RATIO] = 0.9;

    assert_eq!(model.predict(&row).expect("full row"), DefaultLabel::Default);
}

#[test]
fn trees_with_backward_children_are_rejected() {
    let err = GradientBoosted::new(
        feature_names(),
        0.5,
        vec![vec![split(0, 1.0, 1, 0), leaf(0.0)]],
    )
    .expect_err("cycle back to the root");

    assert!(err.0.contains("tree 0: node 0 points to invalid child 0"));
}

#[test]
fn trees_splitting_on_unknown_features_are_rejected() {
    let err = GradientBoosted::new(
        feature_names(),
        0.5,
        vec![vec![split(FEATURE_COUNT, 1.0, 1, 2), leaf(0.0), leaf(0.0)]],
    )
    .expect_err("feature index past the row");

    assert!(err.0.contains("splits on feature 28"));
}

#[test]
fn forests_reject_empty_trees_and_bad_leaves() {
    assert!(RandomForest::new(feature_names(), vec![Vec::new()]).is_err());
    assert!(RandomForest::new(feature_names(), Vec::new()).is_err());

    let err = RandomForest::new(
        feature_names(),
        vec![vec![TreeNode::Leaf { value: [0.0, 0.0] }]],
    )
    .expect_err("zero weights");
    assert!(err.0.contains("leaf 0"));
}

#[test]
fn tree_nodes_deserialize_from_tagged_documents() {
    let document = r#"[
        {"kind":"split","feature":6,"threshold":10.0,"left":1,"right":2},
        {"kind":"leaf","value":-0.5},
        {"kind":"leaf","value":0.5}
    ]"#;

    let nodes: Vec<TreeNode<f64>> = serde_json::from_str(document).expect("nodes parse");

    assert_eq!(nodes[0], split(INTEREST_RATE, 10.0, 1, 2));
    assert_eq!(nodes[2], leaf(0.5));
}

#[test]
fn model_ids_parse_from_identifiers_and_form_labels() {
    for model in ModelId::ordered() {
        assert_eq!(model.as_str().parse::<ModelId>(), Ok(model));
        assert_eq!(model.label().parse::<ModelId>(), Ok(model));
    }
    assert_eq!(
        "XGBoost".parse::<ModelId>(),
        Ok(ModelId::GradientBoosted)
    );
    assert_eq!(
        "svm".parse::<ModelId>(),
        Err(UnknownModel("svm".to_string()))
    );
}

#[test]
fn padded_model_names_are_unknown() {
    assert_eq!(
        " random_forest ".parse::<ModelId>(),
        Err(UnknownModel(" random_forest ".to_string()))
    );
    assert!("XGBoost\n".parse::<ModelId>().is_err());
}

#[test]
fn labels_render_the_form_messages() {
    assert_eq!(DefaultLabel::NoDefault.as_u8(), 0);
    assert_eq!(DefaultLabel::Default.as_u8(), 1);
    assert_eq!(DefaultLabel::NoDefault.message(), "The loan will NOT default.");
    assert_eq!(
        DefaultLabel::Default.message(),
        "The loan is likely to default."
    );
}
