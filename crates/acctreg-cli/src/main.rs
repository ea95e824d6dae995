use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::Cli;
use crate::cli_command::handle_command;
use crate::modules::system::{CommandContext, Settings};
use acctreg_core::SystemClock;

pub(crate) const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env-backed flags.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let settings = Settings::from_cli(&cli)?;

    let pool = acctreg_db::connect_sqlite(&settings.database_url)
        .await
        .with_context(|| format!("failed to open account store {}", settings.database_url))?;
    if let Err(err) = acctreg_db::ensure_schema(&pool).await {
        pool.close().await;
        return Err(err).context("failed to prepare accounts table");
    }

    let clock = SystemClock;
    let ctx = CommandContext {
        pool: &pool,
        settings: &settings,
        clock: &clock,
    };
    let outcome = tokio::select! {
        result = handle_command(cli.command, &ctx) => Some(result),
        () = interrupted() => None,
    };
    pool.close().await;

    match outcome {
        Some(result) => result,
        None => {
            println!("\ninterrupted by operator");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_handler_failed", error = %err);
        std::future::pending::<()>().await;
    }
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
