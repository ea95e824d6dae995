use acctreg_core::{Account, AccountStore};
use async_trait::async_trait;

use super::AccountRepo;

#[async_trait]
impl AccountStore for AccountRepo<'_> {
    async fn list_retry_candidates(&self) -> Result<Vec<Account>, sqlx_core::Error> {
        AccountRepo::list_retry_candidates(self).await
    }

    async fn record_refresh_success(
        &self,
        id: &str,
        access_token: &str,
        refresh_token: &str,
        at: &str,
    ) -> Result<u64, sqlx_core::Error> {
        AccountRepo::record_refresh_success(self, id, access_token, refresh_token, at).await
    }

    async fn record_refresh_failure(&self, id: &str, at: &str) -> Result<u64, sqlx_core::Error> {
        AccountRepo::record_refresh_failure(self, id, at).await
    }
}
