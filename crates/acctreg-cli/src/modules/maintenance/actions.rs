use anyhow::Context;
use acctreg_core::AccountStats;
use acctreg_db::AccountRepo;
use tracing::info;

use super::args::StatsArgs;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_stats(args: StatsArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let accounts = AccountRepo::new(ctx.pool)
        .list_all()
        .await
        .context("failed to load accounts")?;
    let stats = AccountStats::from_accounts(&accounts);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    if stats.is_empty() {
        println!("no accounts found");
        return Ok(());
    }

    println!("total accounts: {}", stats.total);
    println!("  enabled: {}", stats.enabled);
    println!("  disabled: {}", stats.disabled);
    println!("  last refresh failed: {}", stats.refresh_failed);
    println!("  never used (success_count = 0): {}", stats.never_used);
    println!("  with errors (error_count > 0): {}", stats.with_errors);
    println!("total successful calls: {}", stats.total_success_count);
    Ok(())
}

pub(crate) async fn handle_purge_disabled(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let deleted = AccountRepo::new(ctx.pool)
        .delete_disabled_unused()
        .await
        .context("failed to delete disabled accounts")?;
    info!(event = "disabled_accounts_purged", deleted);
    println!("Deleted {deleted} disabled account(s) with zero success count.");
    Ok(())
}

pub(crate) async fn handle_enable_all(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let repo = AccountRepo::new(ctx.pool);
    let total = repo.count_all().await.context("failed to count accounts")?;
    let disabled = repo
        .count_disabled()
        .await
        .context("failed to count disabled accounts")?;
    println!("total accounts: {total}");
    println!("disabled accounts: {disabled}");

    if disabled == 0 {
        println!("all accounts are already enabled");
        return Ok(());
    }

    let enabled = repo
        .enable_all_disabled(&ctx.clock.timestamp())
        .await
        .context("failed to enable accounts")?;
    info!(event = "accounts_enabled", enabled);
    println!("enabled {enabled} account(s)");
    Ok(())
}
