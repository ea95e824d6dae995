use async_trait::async_trait;
use serde::Serialize;

use crate::{Account, RefreshCredentials};

/// Result of a single refresh-token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Success {
        access_token: String,
        /// `None` when the endpoint did not rotate the refresh token.
        refresh_token: Option<String>,
    },
    Failure {
        reason: String,
    },
}

impl RefreshOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// What happened to one candidate account during a retry batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountDisposition {
    Refreshed,
    Failed { reason: String },
    Skipped,
}

impl AccountDisposition {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub remains_disabled: usize,
}

impl RefreshSummary {
    pub fn record(&mut self, disposition: &AccountDisposition) {
        if disposition.is_refreshed() {
            self.refreshed += 1;
        } else {
            self.remains_disabled += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.refreshed + self.remains_disabled
    }
}

/// Performs the refresh-token grant against the token endpoint.
///
/// Implementations never return an error: every transport, status and decode
/// problem is folded into [`RefreshOutcome::Failure`].
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, credentials: &RefreshCredentials) -> RefreshOutcome;
}

/// Persistence used by the refresh processor. Every write is keyed by
/// account id and returns the number of affected rows.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Disabled accounts whose last refresh failed, newest first.
    async fn list_retry_candidates(&self) -> Result<Vec<Account>, sqlx_core::Error>;

    /// Stores the new tokens, re-enables the account and clears `error_count`.
    async fn record_refresh_success(
        &self,
        id: &str,
        access_token: &str,
        refresh_token: &str,
        at: &str,
    ) -> Result<u64, sqlx_core::Error>;

    /// Marks the attempt as failed without touching `enabled` or counters.
    async fn record_refresh_failure(&self, id: &str, at: &str) -> Result<u64, sqlx_core::Error>;
}
