use clap::Parser;
use tracing_subscriber::EnvFilter;

use projections::api::{Cli, run};

#[tokio::main]
async fn main() {
    // stdout is reserved for the JSON printed by the one-shot subcommands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projections=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "projections failed");
        std::process::exit(1);
    }
}
