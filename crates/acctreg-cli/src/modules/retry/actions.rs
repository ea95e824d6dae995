use anyhow::Context;
use acctreg_db::AccountRepo;
use tracing::info;

use super::http::OidcTokenClient;
use super::processor::RefreshProcessor;
use crate::modules::system::{build_http_client, CommandContext};

pub(crate) async fn handle_retry_failed(ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let repo = AccountRepo::new(ctx.pool);
    let candidates = repo
        .list_retry_candidates()
        .await
        .context("failed to load accounts disabled by a failed refresh")?;

    if candidates.is_empty() {
        println!("no accounts need retry");
        return Ok(());
    }
    println!("found {} account(s) to retry", candidates.len());
    info!(
        event = "retry_batch_started",
        candidates = candidates.len(),
        token_url = %ctx.settings.token_url
    );

    let summary = {
        let client = build_http_client(ctx.settings)?;
        let refresher = OidcTokenClient::new(client, ctx.settings.token_url.clone());
        let processor =
            RefreshProcessor::new(&repo, &refresher, ctx.clock, ctx.settings.retry_delay);
        processor.run(&candidates).await
    };

    println!("\nretry finished");
    println!("  re-enabled: {}", summary.refreshed);
    println!("  remains disabled: {}", summary.remains_disabled);
    info!(
        event = "retry_batch_finished",
        refreshed = summary.refreshed,
        remains_disabled = summary.remains_disabled
    );
    Ok(())
}
