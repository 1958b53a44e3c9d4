use crate::commands::{run_batch, run_export, run_validate, BatchArgs, ExportArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use employment_record::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Employment Record",
    about = "Validate, project, and export employment records from the command line or over HTTP",
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
    /// Validate a single record and print its projected income
    Validate(ValidateArgs),
    /// Validate a record and write its JSON export to a directory
    Export(ExportArgs),
    /// Validate and project every row of a CSV file
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Export(args) => run_export(args).await,
        Command::Batch(args) => run_batch(args),
    }
}
