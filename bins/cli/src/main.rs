//! Equilibrio command line
//!
//! Reads a JSON ledger snapshot and prints aggregates as JSON on stdout.
//! Logs go to stderr.

mod cli;
mod commands;

use anyhow::Context as _;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equilibrio_shared::AppConfig;
use equilibrio_shared::config::LoggingConfig;

use crate::cli::{Cli, Command};
use crate::commands::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let ctx = Context::from_config(&config)?;
    let result = match &cli.command {
        Command::Stats(args) => commands::stats(&ctx, args).await,
        Command::Dashboard(args) => commands::dashboard(&ctx, args).await,
        Command::Schedule(args) => commands::schedule(&ctx, args).await,
    };
    let value = result.inspect_err(|err| {
        error!(code = err.error_code(), client = err.is_client_error(), "{err}");
    })?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "equilibrio=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
