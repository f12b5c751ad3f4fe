use anyhow::Result;
use clap::Parser;
use job_search::cli::{handle_command, JobsCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = JobsCli::parse();
    handle_command(cli).await
}
