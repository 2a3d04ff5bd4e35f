use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    run(cli).await?;

    Ok(())
}
