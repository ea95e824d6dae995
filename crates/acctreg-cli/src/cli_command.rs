use crate::cli_args::*;
use crate::modules::maintenance::{handle_enable_all, handle_purge_disabled, handle_stats};
use crate::modules::retry::handle_retry_failed;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Stats(args) => handle_stats(args, ctx).await?,
        Command::PurgeDisabled => handle_purge_disabled(ctx).await?,
        Command::EnableAll => handle_enable_all(ctx).await?,
        Command::RetryFailed => handle_retry_failed(ctx).await?,
    }

    Ok(())
}
