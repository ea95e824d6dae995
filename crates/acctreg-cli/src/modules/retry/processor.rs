use std::time::Duration;

use acctreg_core::{
    Account, AccountDisposition, AccountStore, Clock, RefreshOutcome, RefreshSummary,
    TokenRefresher,
};
use tracing::{error, info, warn};

const ACCOUNT_GONE: &str = "account no longer exists";

/// Retries the refresh-token grant for a fixed set of candidate accounts,
/// one at a time, persisting each outcome as soon as it is known.
pub(crate) struct RefreshProcessor<'a> {
    store: &'a dyn AccountStore,
    refresher: &'a dyn TokenRefresher,
    clock: &'a dyn Clock,
    delay: Duration,
}

impl<'a> RefreshProcessor<'a> {
    pub(crate) fn new(
        store: &'a dyn AccountStore,
        refresher: &'a dyn TokenRefresher,
        clock: &'a dyn Clock,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            refresher,
            clock,
            delay,
        }
    }

    pub(crate) async fn run(&self, accounts: &[Account]) -> RefreshSummary {
        let total = accounts.len();
        let mut summary = RefreshSummary::default();
        for (index, account) in accounts.iter().enumerate() {
            println!(
                "\n--- ({}/{}) processing account: {} ---",
                index + 1,
                total,
                account.display_label()
            );
            let disposition = self.process_account(account).await;
            summary.record(&disposition);

            if index + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
        summary
    }

    pub(crate) async fn process_account(&self, account: &Account) -> AccountDisposition {
        let label = account.display_label();
        let Some(credentials) = account.refresh_credentials() else {
            println!("  [!] account {label} is missing refresh credentials, skipped");
            info!(event = "account_refresh_skipped", account_id = %account.id);
            return AccountDisposition::Skipped;
        };

        match self.refresher.refresh(&credentials).await {
            RefreshOutcome::Success {
                access_token,
                refresh_token,
            } => {
                // Providers that do not rotate keep the stored refresh token valid.
                let refresh_token = refresh_token.unwrap_or(credentials.refresh_token);
                let at = self.clock.timestamp();
                match self
                    .store
                    .record_refresh_success(&account.id, &access_token, &refresh_token, &at)
                    .await
                {
                    Ok(0) => {
                        let reason = ACCOUNT_GONE.to_string();
                        println!("  [x] account {label} refresh not stored: {reason}");
                        warn!(event = "account_refresh_row_missing", account_id = %account.id);
                        AccountDisposition::Failed { reason }
                    }
                    Ok(_) => {
                        println!("  [ok] account {label} refreshed and re-enabled");
                        info!(event = "account_refreshed", account_id = %account.id);
                        AccountDisposition::Refreshed
                    }
                    Err(err) => {
                        error!(
                            event = "account_refresh_persist_failed",
                            account_id = %account.id,
                            error = ?err
                        );
                        self.record_failure(account, format!("failed to store new tokens: {err}"))
                            .await
                    }
                }
            }
            RefreshOutcome::Failure { reason } => self.record_failure(account, reason).await,
        }
    }

    async fn record_failure(&self, account: &Account, reason: String) -> AccountDisposition {
        let label = account.display_label();
        let at = self.clock.timestamp();
        match self.store.record_refresh_failure(&account.id, &at).await {
            Ok(0) => {
                println!("  [x] account {label}: could not record failed refresh: {ACCOUNT_GONE}");
                warn!(event = "account_refresh_row_missing", account_id = %account.id);
            }
            Ok(_) => {}
            Err(err) => {
                println!("  [x] account {label}: could not record failed refresh: {err}");
                error!(
                    event = "account_refresh_status_write_failed",
                    account_id = %account.id,
                    error = ?err
                );
            }
        }
        println!("  [x] account {label} refresh failed: {reason}");
        warn!(event = "account_refresh_failed", account_id = %account.id, reason = %reason);
        AccountDisposition::Failed { reason }
    }
}
