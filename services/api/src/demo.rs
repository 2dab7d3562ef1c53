use crate::infra::load_scoring_service;
use clap::Args;
use loan_default::config::AppConfig;
use loan_default::error::AppError;
use loan_default::scoring::{
    ApplicantSubmission, Assessment, FeatureSegment, ModelId, FEATURE_COLUMNS,
};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Applicant answers mirroring the web form, with the form's starting values.
#[derive(Args, Debug, Clone)]
pub(crate) struct ApplicantArgs {
    #[arg(long, default_value_t = 30)]
    pub(crate) age: i64,
    #[arg(long, default_value_t = 50_000)]
    pub(crate) income: i64,
    #[arg(long, default_value_t = 20_000)]
    pub(crate) loan_amount: i64,
    #[arg(long, default_value_t = 700)]
    pub(crate) credit_score: i64,
    #[arg(long, default_value_t = 24)]
    pub(crate) months_employed: i64,
    #[arg(long, default_value_t = 5)]
    pub(crate) num_credit_lines: i64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 4.5)]
    pub(crate) interest_rate: f64,
    /// Loan term in months
    #[arg(long, default_value_t = 36)]
    pub(crate) loan_term: i64,
    /// Debt-to-income ratio
    #[arg(long, default_value_t = 0.25)]
    pub(crate) dti_ratio: f64,
    /// Bachelor's, High School, Master's or PhD
    #[arg(long, default_value = "Bachelor's")]
    pub(crate) education: String,
    /// Full-time, Part-time, Self-employed or Unemployed
    #[arg(long, default_value = "Full-time")]
    pub(crate) employment_type: String,
    /// Divorced, Married or Single
    #[arg(long, default_value = "Single")]
    pub(crate) marital_status: String,
    /// Auto, Business, Education, Home or Other
    #[arg(long, default_value = "Auto")]
    pub(crate) loan_purpose: String,
    #[arg(long, default_value = "No")]
    pub(crate) has_mortgage: String,
    #[arg(long, default_value = "No")]
    pub(crate) has_dependents: String,
    #[arg(long, default_value = "No")]
    pub(crate) has_co_signer: String,
}

impl From<ApplicantArgs> for ApplicantSubmission {
    fn from(args: ApplicantArgs) -> Self {
        Self {
            age: args.age,
            income: args.income,
            loan_amount: args.loan_amount,
            credit_score: args.credit_score,
            months_employed: args.months_employed,
            num_credit_lines: args.num_credit_lines,
            interest_rate: args.interest_rate,
            loan_term: args.loan_term,
            dti_ratio: args.dti_ratio,
            education: args.education,
            employment_type: args.employment_type,
            marital_status: args.marital_status,
            loan_purpose: args.loan_purpose,
            has_mortgage: args.has_mortgage,
            has_dependents: args.has_dependents,
            has_co_signer: args.has_co_signer,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[command(flatten)]
    pub(crate) applicant: ApplicantArgs,
    /// Model to score with (identifier or form label). Defaults to the configured model.
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Override the configured artifact directory
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// Print the encoded feature row alongside the prediction
    #[arg(long)]
    pub(crate) show_features: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the configured artifact directory
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// Print the encoded feature row once before the model comparison
    #[arg(long)]
    pub(crate) show_features: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        applicant,
        model,
        artifact_dir,
        show_features,
    } = args;

    let config = AppConfig::load()?;
    let artifact_dir = artifact_dir.unwrap_or(config.scoring.artifact_dir);
    let service = load_scoring_service(&artifact_dir, config.scoring.default_model)?;

    let assessment = service.assess(&applicant.into(), model.as_deref())?;
    print!("{}", render_assessment(&assessment, show_features));

    Ok(())
}

pub(crate) fn run_schema() {
    print!("{}", render_schema());
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        artifact_dir,
        show_features,
    } = args;

    let config = AppConfig::load()?;
    let artifact_dir = artifact_dir.unwrap_or(config.scoring.artifact_dir);
    let service = load_scoring_service(&artifact_dir, config.scoring.default_model)?;
    let applicant = ApplicantSubmission::default();

    println!("Loan default prediction demo");
    println!(
        "Applicant: age {} | income {} | loan {} | credit score {} | rate {}% over {} months | DTI {}",
        applicant.age,
        applicant.income,
        applicant.loan_amount,
        applicant.credit_score,
        applicant.interest_rate,
        applicant.loan_term,
        applicant.dti_ratio
    );
    println!(
        "           {} | {} | {} | purpose {}",
        applicant.education,
        applicant.employment_type,
        applicant.marital_status,
        applicant.loan_purpose
    );

    let mut features_shown = !show_features;
    for summary in service.models() {
        let assessment = service.assess(&applicant, Some(summary.id.as_str()))?;
        if !features_shown {
            print!("{}", render_features(&assessment));
            features_shown = true;
        }
        let marker = if summary.default { " (default)" } else { "" };
        println!(
            "- {}{}: {} [{}]",
            summary.label,
            marker,
            assessment.message(),
            assessment.label.as_u8()
        );
    }

    Ok(())
}

pub(crate) fn render_assessment(assessment: &Assessment, show_features: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Model: {}", model_line(assessment.model));
    let _ = writeln!(output, "Prediction: {}", assessment.message());
    let _ = writeln!(output, "Label: {}", assessment.label.as_u8());
    if show_features {
        output.push_str(&render_features(assessment));
    }
    output
}

fn model_line(model: ModelId) -> String {
    format!("{} ({})", model.label(), model.as_str())
}

fn render_features(assessment: &Assessment) -> String {
    let mut output = String::from("Encoded features:\n");
    for segment in FeatureSegment::ordered() {
        let _ = writeln!(output, "  {segment:?}");
        for (name, value) in segment
            .columns()
            .iter()
            .zip(assessment.features.segment(segment))
        {
            let _ = writeln!(output, "    {name:<30} {value:>10.4}");
        }
    }
    output
}

pub(crate) fn render_schema() -> String {
    let mut output = String::new();
    for (index, name) in FEATURE_COLUMNS.iter().enumerate() {
        let _ = writeln!(output, "{index:>2} {name}");
    }
    output
}
