use super::common::*;
use std::sync::Arc;

use crate::scoring::models::Transformer;
use crate::scoring::{
    ApplicantRecord, Categorical, Education, EmploymentType, EncodingError, FeatureEncoder,
    FeatureSegment, LoanPurpose, MaritalStatus, StandardScaler, FEATURE_COLUMNS, FEATURE_COUNT,
};

#[test]
fn encodes_every_column_in_schema_order() {
    let vector = encoder()
        .encode_submission(&submission())
        .expect("default applicant encodes");

    assert_eq!(vector.values().len(), FEATURE_COUNT);
    assert_eq!(vector.values().len(), 28);
    let names: Vec<&str> = vector.iter().map(|(name, _)| name).collect();
    assert_eq!(names, FEATURE_COLUMNS.to_vec());
    assert_eq!(names[0], "Age");
    assert_eq!(names[12], "Education_Bachelor's");
    assert_eq!(names[27], "LoanPurpose_Other");
}

#[test]
fn segments_tile_the_row_without_gaps() {
    let mut next = 0;
    for segment in FeatureSegment::ordered() {
        let range = segment.range();
        assert_eq!(range.start, next, "{segment:?} starts where the previous ended");
        next = range.end;
    }
    assert_eq!(next, FEATURE_COUNT);
}

#[test]
fn reference_applicant_matches_documented_layout() {
    let scaler = fitted_scaler();
    let encoder = FeatureEncoder::new(Arc::new(scaler.clone())).expect("scaler matches schema");

    let vector = encoder
        .encode_submission(&submission())
        .expect("reference applicant encodes");

    let expected_numeric = scaler
        .transform(&[30.0, 50_000.0, 20_000.0, 700.0, 24.0, 5.0, 4.5, 36.0, 0.25])
        .expect("scaler accepts nine values");
    assert_eq!(vector.segment(FeatureSegment::Numeric), expected_numeric.as_slice());
    assert_eq!(vector.segment(FeatureSegment::Flags), &[0.0, 0.0, 0.0]);
    assert_eq!(
        vector.segment(FeatureSegment::Education),
        &[1.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(
        vector.segment(FeatureSegment::EmploymentType),
        &[1.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(vector.segment(FeatureSegment::MaritalStatus), &[0.0, 0.0, 1.0]);
    assert_eq!(
        vector.segment(FeatureSegment::LoanPurpose),
        &[1.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn identity_scaler_passes_raw_numerics_through() {
    let vector = encoder()
        .encode_submission(&submission())
        .expect("default applicant encodes");

    assert_eq!(vector.get("Income"), Some(50_000.0));
    assert_eq!(vector.get("InterestRate"), Some(4.5));
    assert_eq!(vector.get("DTIRatio"), Some(0.25));
    assert_eq!(vector.get("Unknown"), None);
}

#[test]
fn encoding_is_bit_identical_across_runs() {
    let encoder = FeatureEncoder::new(Arc::new(fitted_scaler())).expect("scaler matches schema");

    let first = encoder.encode_submission(&risky_submission()).expect("encodes");
    let second = encoder.encode_submission(&risky_submission()).expect("encodes");

    let first_bits: Vec<u64> = first.values().iter().map(|value| value.to_bits()).collect();
    let second_bits: Vec<u64> = second.values().iter().map(|value| value.to_bits()).collect();
    assert_eq!(first_bits, second_bits);
}

fn assert_one_hot<C: Categorical>(segment: FeatureSegment, set: impl Fn(&mut ApplicantRecord, C)) {
    let base = ApplicantRecord::try_from(&submission()).expect("valid record");
    for variant in C::VARIANTS {
        let mut record = base;
        set(&mut record, *variant);
        let vector = encoder().encode(&record).expect("record encodes");
        let block = vector.segment(segment);

        assert_eq!(block.len(), C::VARIANTS.len());
        assert_eq!(block.iter().filter(|value| **value == 1.0).count(), 1);
        assert_eq!(block.iter().filter(|value| **value == 0.0).count(), block.len() - 1);
        assert_eq!(block[variant.position()], 1.0);
        assert_eq!(
            segment.columns()[variant.position()],
            variant.column_name(),
            "{} maps to its training column",
            variant.label()
        );
    }
}

#[test]
fn every_category_sets_exactly_one_column() {
    assert_one_hot::<Education>(FeatureSegment::Education, |record, value| {
        record.education = value
    });
    assert_one_hot::<EmploymentType>(FeatureSegment::EmploymentType, |record, value| {
        record.employment_type = value
    });
    assert_one_hot::<MaritalStatus>(FeatureSegment::MaritalStatus, |record, value| {
        record.marital_status = value
    });
    assert_one_hot::<LoanPurpose>(FeatureSegment::LoanPurpose, |record, value| {
        record.loan_purpose = value
    });
}

#[test]
fn high_school_uses_the_second_education_column() {
    let mut applicant = submission();
    applicant.education = "High School".to_string();

    let vector = encoder().encode_submission(&applicant).expect("encodes");

    assert_eq!(
        vector.segment(FeatureSegment::Education),
        &[0.0, 1.0, 0.0, 0.0]
    );
    assert_eq!(vector.get("Education_High School"), Some(1.0));
}

#[test]
fn only_a_literal_yes_sets_a_flag() {
    let mut applicant = submission();
    applicant.has_mortgage = "Yes".to_string();
    applicant.has_dependents = "yes".to_string();
    applicant.has_co_signer = "Maybe".to_string();

    let vector = encoder().encode_submission(&applicant).expect("encodes");

    assert_eq!(vector.segment(FeatureSegment::Flags), &[1.0, 0.0, 0.0]);
}

#[test]
fn unknown_category_produces_no_vector() {
    let mut applicant = submission();
    applicant.education = "Doctorate".to_string();

    match encoder().encode_submission(&applicant) {
        Err(EncodingError::UnknownCategory {
            field,
            value,
            expected,
        }) => {
            assert_eq!(field, "education");
            assert_eq!(value, "Doctorate");
            assert!(expected.contains("PhD"));
        }
        other => panic!("expected unknown category, got {other:?}"),
    }
}

#[test]
fn padded_category_labels_are_unknown() {
    let mut applicant = submission();
    applicant.loan_purpose = "  Home ".to_string();

    match encoder().encode_submission(&applicant) {
        Err(EncodingError::UnknownCategory { field, value, .. }) => {
            assert_eq!(field, "loan_purpose");
            assert_eq!(value, "  Home ");
        }
        other => panic!("expected unknown category, got {other:?}"),
    }

    applicant.loan_purpose = "Home".to_string();
    applicant.education = " PhD\t".to_string();
    assert!(matches!(
        encoder().encode_submission(&applicant),
        Err(EncodingError::UnknownCategory {
            field: "education",
            ..
        })
    ));
}

#[test]
fn numeric_inputs_outside_form_ranges_are_rejected() {
    let cases = [
        ("age", {
            let mut applicant = submission();
            applicant.age = 17;
            applicant
        }),
        ("credit_score", {
            let mut applicant = submission();
            applicant.credit_score = 900;
            applicant
        }),
        ("loan_term", {
            let mut applicant = submission();
            applicant.loan_term = 3;
            applicant
        }),
        ("interest_rate", {
            let mut applicant = submission();
            applicant.interest_rate = -0.5;
            applicant
        }),
        ("dti_ratio", {
            let mut applicant = submission();
            applicant.dti_ratio = f64::NAN;
            applicant
        }),
        ("income", {
            let mut applicant = submission();
            applicant.income = -1;
            applicant
        }),
        ("loan_amount", {
            let mut applicant = submission();
            applicant.loan_amount = -20_000;
            applicant
        }),
        ("months_employed", {
            let mut applicant = submission();
            applicant.months_employed = -3;
            applicant
        }),
        ("num_credit_lines", {
            let mut applicant = submission();
            applicant.num_credit_lines = -1;
            applicant
        }),
    ];

    for (expected_field, applicant) in cases {
        match encoder().encode_submission(&applicant) {
            Err(EncodingError::OutOfRange { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected {expected_field} to be out of range, got {other:?}"),
        }
    }
}

#[test]
fn scaler_fitted_on_other_columns_is_rejected_at_construction() {
    let mut names = numeric_names();
    names.swap(0, 1);
    let scaler = StandardScaler::new(names, vec![0.0; 9], vec![1.0; 9]).expect("valid scaler");

    let err = match FeatureEncoder::new(Arc::new(scaler)) {
        Err(err) => err,
        Ok(_) => panic!("column swap must be rejected"),
    };

    assert_eq!(err.artifact, "scaler");
    assert!(err.detail.contains("column 0 is 'Income'"));
}

#[test]
fn scaler_with_missing_columns_is_rejected_at_construction() {
    let mut names = numeric_names();
    names.pop();
    let scaler = StandardScaler::new(names, vec![0.0; 8], vec![1.0; 8]).expect("valid scaler");

    assert!(FeatureEncoder::new(Arc::new(scaler)).is_err());
}

#[test]
fn feature_vector_serializes_as_ordered_map() {
    let vector = encoder().encode_submission(&submission()).expect("encodes");

    let json = serde_json::to_string(&vector).expect("serializes");

    assert!(json.starts_with("{\"Age\":30.0,\"Income\":50000.0"));
    assert!(json.ends_with("\"LoanPurpose_Other\":0.0}"));
}
