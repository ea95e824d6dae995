use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::maintenance::args::*;

#[derive(Parser)]
#[command(name = "acctreg")]
#[command(about = "Maintenance commands for the local account registry")]
pub struct Cli {
    #[arg(
        long,
        env = "ACCTREG_DATABASE_URL",
        default_value = acctreg_db::DEFAULT_DATABASE_URL
    )]
    pub database_url: String,
    #[arg(long, env = "ACCTREG_TOKEN_URL", hide = true)]
    pub token_url: Option<String>,
    #[arg(long, env = "HTTP_PROXY", help = "Route token requests through this proxy")]
    pub proxy: Option<String>,
    #[arg(
        long,
        env = "ACCTREG_RETRY_DELAY_MS",
        default_value_t = 1000,
        help = "Pause between consecutive refresh attempts"
    )]
    pub delay_ms: u64,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Print aggregate account statistics")]
    Stats(StatsArgs),
    #[command(about = "Delete disabled accounts that never served a successful call")]
    PurgeDisabled,
    #[command(about = "Re-enable every disabled account, keeping its counters")]
    EnableAll,
    #[command(about = "Retry the token refresh of accounts disabled by a failed refresh")]
    RetryFailed,
}
