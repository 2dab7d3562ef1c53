use std::ops::Range;

/// Number of numeric columns passed through the scaler.
pub const NUMERIC_FEATURE_COUNT: usize = 9;

/// Total width of an encoded applicant row.
pub const FEATURE_COUNT: usize = 28;

/// Column names in the order the scaler was fitted on.
pub const NUMERIC_COLUMNS: [&str; NUMERIC_FEATURE_COUNT] = [
    "Age",
    "Income",
    "LoanAmount",
    "CreditScore",
    "MonthsEmployed",
    "NumCreditLines",
    "InterestRate",
    "LoanTerm",
    "DTIRatio",
];

/// Column names in the order every classifier was trained on.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Age",
    "Income",
    "LoanAmount",
    "CreditScore",
    "MonthsEmployed",
    "NumCreditLines",
    "InterestRate",
    "LoanTerm",
    "DTIRatio",
    "HasMortgage",
    "HasDependents",
    "HasCoSigner",
    "Education_Bachelor's",
    "Education_High School",
    "Education_Master's",
    "Education_PhD",
    "EmploymentType_Full-time",
    "EmploymentType_Part-time",
    "EmploymentType_Self-employed",
    "EmploymentType_Unemployed",
    "MaritalStatus_Divorced",
    "MaritalStatus_Married",
    "MaritalStatus_Single",
    "LoanPurpose_Auto",
    "LoanPurpose_Business",
    "LoanPurpose_Education",
    "LoanPurpose_Home",
    "LoanPurpose_Other",
];

/// Contiguous blocks of the encoded row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSegment {
    Numeric,
    Flags,
    Education,
    EmploymentType,
    MaritalStatus,
    LoanPurpose,
}

impl FeatureSegment {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Numeric,
            Self::Flags,
            Self::Education,
            Self::EmploymentType,
            Self::MaritalStatus,
            Self::LoanPurpose,
        ]
    }

    pub const fn range(self) -> Range<usize> {
        match self {
            Self::Numeric => 0..9,
            Self::Flags => 9..12,
            Self::Education => 12..16,
            Self::EmploymentType => 16..20,
            Self::MaritalStatus => 20..23,
            Self::LoanPurpose => 23..28,
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        const COLUMNS: &[&str] = &FEATURE_COLUMNS;
        &COLUMNS[self.range()]
    }
}

/// Raised when an artifact or row disagrees with the fixed column layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{artifact} does not match the feature schema: {detail}")]
pub struct SchemaMismatch {
    pub artifact: String,
    pub detail: String,
}

impl SchemaMismatch {
    pub fn new(artifact: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            detail: detail.into(),
        }
    }
}

/// Compare declared column names against the expected layout, name by name.
pub fn check_columns(
    artifact: &str,
    expected: &[&str],
    found: &[String],
) -> Result<(), SchemaMismatch> {
    if expected.len() != found.len() {
        return Err(SchemaMismatch::new(
            artifact,
            format!(
                "expected {} columns, artifact declares {}",
                expected.len(),
                found.len()
            ),
        ));
    }

    match expected
        .iter()
        .zip(found)
        .position(|(expected, found)| *expected != found.as_str())
    {
        Some(index) => Err(SchemaMismatch::new(
            artifact,
            format!(
                "column {index} is '{}' but '{}' was expected",
                found[index], expected[index]
            ),
        )),
        None => Ok(()),
    }
}

pub(crate) fn ensure_width(
    artifact: &str,
    expected: usize,
    found: usize,
) -> Result<(), SchemaMismatch> {
    if expected == found {
        Ok(())
    } else {
        Err(SchemaMismatch::new(
            artifact,
            format!("expected a row of {expected} values, received {found}"),
        ))
    }
}
