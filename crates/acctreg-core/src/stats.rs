use serde::Serialize;

use crate::{Account, RefreshStatus};

/// Aggregate counters over the whole registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountStats {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub refresh_failed: usize,
    pub never_used: usize,
    pub with_errors: usize,
    pub total_success_count: i64,
}

impl AccountStats {
    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        accounts
            .into_iter()
            .fold(Self::default(), |mut stats, account| {
                stats.total += 1;
                if account.enabled {
                    stats.enabled += 1;
                } else {
                    stats.disabled += 1;
                }
                if account.last_refresh_status == Some(RefreshStatus::Failed) {
                    stats.refresh_failed += 1;
                }
                if account.success_count == 0 {
                    stats.never_used += 1;
                }
                if account.error_count > 0 {
                    stats.with_errors += 1;
                }
                stats.total_success_count += account.success_count;
                stats
            })
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
