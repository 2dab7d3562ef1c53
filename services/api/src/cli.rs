use crate::demo::{run_demo, run_predict, run_schema, DemoArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_default::error::AppError;
use loan_default::scoring::ModelId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Default Predictor",
    about = "Score loan applicants against pretrained default classifiers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single applicant from command-line answers
    Predict(PredictArgs),
    /// Print the encoded feature columns in model order
    Schema,
    /// Run the reference applicant through every available model
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory holding scaler.json and the classifier documents
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// Model used when a request does not name one
    #[arg(long, value_parser = crate::infra::parse_model)]
    pub(crate) default_model: Option<ModelId>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Schema => {
            run_schema();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
