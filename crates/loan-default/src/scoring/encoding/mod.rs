//! Applicant row encoding: scaled numerics, Yes/No flags, and one-hot blocks
//! laid out in the fixed column order the classifiers were trained on.

mod schema;

pub use schema::{
    check_columns, FeatureSegment, SchemaMismatch, FEATURE_COLUMNS, FEATURE_COUNT,
    NUMERIC_COLUMNS, NUMERIC_FEATURE_COUNT,
};
pub(crate) use schema::ensure_width;

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::domain::{ApplicantRecord, ApplicantSubmission, Categorical};
use super::models::Transformer;

/// Error raised while turning an applicant into a feature row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown {field} category '{value}' (expected one of: {expected})")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: String,
    },
    #[error("{field} value {value} is outside the accepted range {range}")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: &'static str,
    },
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),
}

/// Encoded applicant row. Always [`FEATURE_COUNT`] values in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        FEATURE_COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|index| self.values[index])
    }

    pub fn segment(&self, segment: FeatureSegment) -> &[f64] {
        &self.values[segment.range()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.values.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}

/// Builds feature rows using the pre-fitted scaler.
#[derive(Clone)]
pub struct FeatureEncoder {
    scaler: Arc<dyn Transformer>,
}

impl FeatureEncoder {
    /// Fails when the scaler was fitted on a different numeric column layout.
    pub fn new(scaler: Arc<dyn Transformer>) -> Result<Self, SchemaMismatch> {
        check_columns("scaler", &NUMERIC_COLUMNS, scaler.feature_names())?;
        Ok(Self { scaler })
    }

    pub fn encode(&self, record: &ApplicantRecord) -> Result<FeatureVector, EncodingError> {
        let scaled = self.scaler.transform(&record.numeric_features())?;
        ensure_width("scaler output", NUMERIC_FEATURE_COUNT, scaled.len())?;

        let mut values = [0.0; FEATURE_COUNT];
        values[FeatureSegment::Numeric.range()].copy_from_slice(&scaled);
        values[FeatureSegment::Flags.range()].copy_from_slice(&record.flag_features());
        record
            .education
            .write_one_hot(&mut values[FeatureSegment::Education.range()]);
        record
            .employment_type
            .write_one_hot(&mut values[FeatureSegment::EmploymentType.range()]);
        record
            .marital_status
            .write_one_hot(&mut values[FeatureSegment::MaritalStatus.range()]);
        record
            .loan_purpose
            .write_one_hot(&mut values[FeatureSegment::LoanPurpose.range()]);

        Ok(FeatureVector { values })
    }

    /// Validate a raw submission and encode it in one step.
    pub fn encode_submission(
        &self,
        submission: &ApplicantSubmission,
    ) -> Result<FeatureVector, EncodingError> {
        let record = ApplicantRecord::try_from(submission)?;
        self.encode(&record)
    }
}
