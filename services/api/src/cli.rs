use crate::report::{
    run_deadlines, run_import, run_jurisdictions, DeadlineArgs, ImportArgs, JurisdictionArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use permit_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Permit Deadline Tracker",
    about = "Track building permit deadlines for Thurston County properties",
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
    /// Compute deadlines for a single project's milestone dates
    Deadlines(DeadlineArgs),
    /// Build a deadline report from a CSV export of projects
    Import(ImportArgs),
    /// List permitting jurisdictions or show one in detail
    Jurisdictions(JurisdictionArgs),
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
        Command::Deadlines(args) => run_deadlines(args),
        Command::Import(args) => run_import(args),
        Command::Jurisdictions(args) => run_jurisdictions(args),
    }
}
