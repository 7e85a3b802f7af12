use crate::render::{run_snapshot, SnapshotArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leadboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "leadboard-api",
    about = "Serve or print sampled leads dashboard data",
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
    /// Sample one dashboard snapshot and print it
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Default sampler seed for requests that do not pass one
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Snapshot(args) => run_snapshot(args),
    }
}
