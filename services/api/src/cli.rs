use crate::assess::{run_assessment, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ops_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "City Operational Risk Monitor",
    about = "Score daily city features for operational risk and surface high-risk alerts",
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
    /// Score a feature CSV, write the risk tables and print today's alerts
    Assess(AssessArgs),
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
        Command::Assess(args) => run_assessment(args),
    }
}
