use crate::assess::{run_assess, run_catalog, AssessArgs, CatalogArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use readiness_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Readiness Coach",
    about = "Score employability readiness and serve the coaching session API",
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
    /// Score a JSON payload and list suggested barriers
    Assess(AssessArgs),
    /// List the barrier bank
    Catalog(CatalogArgs),
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
        Command::Assess(args) => run_assess(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
