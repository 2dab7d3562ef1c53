use serde::{Deserialize, Serialize};

use super::encoding::{EncodingError, NUMERIC_FEATURE_COUNT};

/// Applicant form payload exactly as the presentation layer collects it.
///
/// Categorical answers and Yes/No flags stay free-form strings here, and
/// integers are signed so a negative answer reaches range validation instead
/// of failing deserialization. Both are checked when converted into an
/// [`ApplicantRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub age: i64,
    pub income: i64,
    pub loan_amount: i64,
    pub credit_score: i64,
    pub months_employed: i64,
    pub num_credit_lines: i64,
    pub interest_rate: f64,
    pub loan_term: i64,
    pub dti_ratio: f64,
    pub education: String,
    pub employment_type: String,
    pub marital_status: String,
    pub loan_purpose: String,
    pub has_mortgage: String,
    pub has_dependents: String,
    pub has_co_signer: String,
}

impl Default for ApplicantSubmission {
    fn default() -> Self {
        Self {
            age: 30,
            income: 50_000,
            loan_amount: 20_000,
            credit_score: 700,
            months_employed: 24,
            num_credit_lines: 5,
            interest_rate: 4.5,
            loan_term: 36,
            dti_ratio: 0.25,
            education: Education::Bachelors.label().to_string(),
            employment_type: EmploymentType::FullTime.label().to_string(),
            marital_status: MaritalStatus::Single.label().to_string(),
            loan_purpose: LoanPurpose::Auto.label().to_string(),
            has_mortgage: "No".to_string(),
            has_dependents: "No".to_string(),
            has_co_signer: "No".to_string(),
        }
    }
}

/// Validated applicant attributes ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantRecord {
    pub age: u32,
    pub income: u64,
    pub loan_amount: u64,
    pub credit_score: u32,
    pub months_employed: u32,
    pub num_credit_lines: u32,
    pub interest_rate: f64,
    pub loan_term: u32,
    pub dti_ratio: f64,
    pub education: Education,
    pub employment_type: EmploymentType,
    pub marital_status: MaritalStatus,
    pub loan_purpose: LoanPurpose,
    pub has_mortgage: bool,
    pub has_dependents: bool,
    pub has_co_signer: bool,
}

impl ApplicantRecord {
    /// Raw numeric inputs in scaler column order.
    pub fn numeric_features(&self) -> [f64; NUMERIC_FEATURE_COUNT] {
        [
            f64::from(self.age),
            self.income as f64,
            self.loan_amount as f64,
            f64::from(self.credit_score),
            f64::from(self.months_employed),
            f64::from(self.num_credit_lines),
            self.interest_rate,
            f64::from(self.loan_term),
            self.dti_ratio,
        ]
    }

    pub fn flag_features(&self) -> [f64; 3] {
        [
            flag_value(self.has_mortgage),
            flag_value(self.has_dependents),
            flag_value(self.has_co_signer),
        ]
    }
}

impl TryFrom<&ApplicantSubmission> for ApplicantRecord {
    type Error = EncodingError;

    fn try_from(submission: &ApplicantSubmission) -> Result<Self, Self::Error> {
        let age = check_integer("age", submission.age, 18, 100, "18..=100")?;
        let income = check_integer("income", submission.income, 0, i64::MAX, ">= 0")?;
        let loan_amount =
            check_integer("loan_amount", submission.loan_amount, 0, i64::MAX, ">= 0")?;
        let credit_score = check_integer(
            "credit_score",
            submission.credit_score,
            300,
            850,
            "300..=850",
        )?;
        let months_employed = check_integer(
            "months_employed",
            submission.months_employed,
            0,
            i64::MAX,
            ">= 0",
        )?;
        let num_credit_lines = check_integer(
            "num_credit_lines",
            submission.num_credit_lines,
            0,
            i64::MAX,
            ">= 0",
        )?;
        let loan_term = check_integer("loan_term", submission.loan_term, 6, i64::MAX, ">= 6")?;
        check_range(
            "interest_rate",
            submission.interest_rate,
            0.0,
            f64::MAX,
            ">= 0.0",
        )?;
        check_range("dti_ratio", submission.dti_ratio, 0.0, f64::MAX, ">= 0.0")?;

        Ok(Self {
            age,
            income,
            loan_amount,
            credit_score,
            months_employed,
            num_credit_lines,
            interest_rate: submission.interest_rate,
            loan_term,
            dti_ratio: submission.dti_ratio,
            education: Education::parse(&submission.education)?,
            employment_type: EmploymentType::parse(&submission.employment_type)?,
            marital_status: MaritalStatus::parse(&submission.marital_status)?,
            loan_purpose: LoanPurpose::parse(&submission.loan_purpose)?,
            has_mortgage: answer_is_yes(&submission.has_mortgage),
            has_dependents: answer_is_yes(&submission.has_dependents),
            has_co_signer: answer_is_yes(&submission.has_co_signer),
        })
    }
}

/// Only the literal answer "Yes" sets a flag; anything else reads as "No".
pub fn answer_is_yes(answer: &str) -> bool {
    answer == "Yes"
}

fn flag_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Range-check a signed form answer and narrow it to the record's type.
fn check_integer<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
    range: &'static str,
) -> Result<T, EncodingError> {
    (min..=max)
        .contains(&value)
        .then(|| T::try_from(value).ok())
        .flatten()
        .ok_or_else(|| EncodingError::OutOfRange {
            field,
            value: value.to_string(),
            range,
        })
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    range: &'static str,
) -> Result<(), EncodingError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(EncodingError::OutOfRange {
            field,
            value: value.to_string(),
            range,
        })
    }
}

/// Closed enumeration backing one block of one-hot columns.
pub trait Categorical: Copy + Sized + 'static {
    /// Field name used in error messages.
    const FIELD: &'static str;
    /// Prefix of the dummy columns produced at training time.
    const COLUMN_PREFIX: &'static str;
    /// Every variant, in one-hot column order.
    const VARIANTS: &'static [Self];

    fn label(self) -> &'static str;

    /// Fixed position of this variant inside its one-hot block.
    fn position(self) -> usize;

    fn parse(raw: &str) -> Result<Self, EncodingError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.label() == raw)
            .ok_or_else(|| EncodingError::UnknownCategory {
                field: Self::FIELD,
                value: raw.to_string(),
                expected: Self::VARIANTS
                    .iter()
                    .map(|variant| variant.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn column_name(self) -> String {
        format!("{}_{}", Self::COLUMN_PREFIX, self.label())
    }

    /// Write this variant's 0/1 pattern into its block of the row.
    fn write_one_hot(self, block: &mut [f64]) {
        block.fill(0.0);
        block[self.position()] = 1.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    Bachelors,
    HighSchool,
    Masters,
    Phd,
}

impl Categorical for Education {
    const FIELD: &'static str = "education";
    const COLUMN_PREFIX: &'static str = "Education";
    const VARIANTS: &'static [Self] = &[
        Self::Bachelors,
        Self::HighSchool,
        Self::Masters,
        Self::Phd,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Bachelors => "Bachelor's",
            Self::HighSchool => "High School",
            Self::Masters => "Master's",
            Self::Phd => "PhD",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::Bachelors => 0,
            Self::HighSchool => 1,
            Self::Masters => 2,
            Self::Phd => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
}

impl Categorical for EmploymentType {
    const FIELD: &'static str = "employment_type";
    const COLUMN_PREFIX: &'static str = "EmploymentType";
    const VARIANTS: &'static [Self] = &[
        Self::FullTime,
        Self::PartTime,
        Self::SelfEmployed,
        Self::Unemployed,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::SelfEmployed => "Self-employed",
            Self::Unemployed => "Unemployed",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::FullTime => 0,
            Self::PartTime => 1,
            Self::SelfEmployed => 2,
            Self::Unemployed => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Divorced,
    Married,
    Single,
}

impl Categorical for MaritalStatus {
    const FIELD: &'static str = "marital_status";
    const COLUMN_PREFIX: &'static str = "MaritalStatus";
    const VARIANTS: &'static [Self] = &[Self::Divorced, Self::Married, Self::Single];

    fn label(self) -> &'static str {
        match self {
            Self::Divorced => "Divorced",
            Self::Married => "Married",
            Self::Single => "Single",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::Divorced => 0,
            Self::Married => 1,
            Self::Single => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Auto,
    Business,
    Education,
    Home,
    Other,
}

impl Categorical for LoanPurpose {
    const FIELD: &'static str = "loan_purpose";
    const COLUMN_PREFIX: &'static str = "LoanPurpose";
    const VARIANTS: &'static [Self] = &[
        Self::Auto,
        Self::Business,
        Self::Education,
        Self::Home,
        Self::Other,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Business => "Business",
            Self::Education => "Education",
            Self::Home => "Home",
            Self::Other => "Other",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::Auto => 0,
            Self::Business => 1,
            Self::Education => 2,
            Self::Home => 3,
            Self::Other => 4,
        }
    }
}
