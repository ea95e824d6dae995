use clap::Args;

#[derive(Args)]
pub struct StatsArgs {
    #[arg(long, help = "Print the counters as JSON")]
    pub json: bool,
}
