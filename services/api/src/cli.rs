use crate::reports::{run_analytics, run_export, AnalyticsArgs, ExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estate_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Estate Hub",
    about = "Serve the bilingual real-estate catalog or inspect it from the command line",
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
    /// Print the dashboard summary for the seeded catalog
    Analytics(AnalyticsArgs),
    /// Write a CSV export of leads, properties or partners
    Export(ExportArgs),
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
        Command::Analytics(args) => run_analytics(args).await,
        Command::Export(args) => run_export(args).await,
    }
}
