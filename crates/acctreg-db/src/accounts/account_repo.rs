use acctreg_core::{Account, RefreshStatus};

use crate::SqlitePool;

pub struct AccountRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, account: &Account) -> Result<(), sqlx_core::Error> {
        query!(
            r#"
            INSERT INTO accounts (
                id, label, clientId, clientSecret, refreshToken, accessToken, other,
                last_refresh_time, last_refresh_status, created_at, updated_at,
                enabled, error_count, success_count
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            account.id.as_str(),
            account.label.as_deref(),
            account.client_id.as_deref(),
            account.client_secret.as_deref(),
            account.refresh_token.as_deref(),
            account.access_token.as_deref(),
            account.other.as_deref(),
            account.last_refresh_time.as_deref(),
            account.last_refresh_status.map(|status| status.as_str()),
            account.created_at.as_str(),
            account.updated_at.as_str(),
            account.enabled,
            account.error_count,
            account.success_count
        )
        .execute(self.pool)
        .await
        .map(|_| ())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Account>, sqlx_core::Error> {
        query_as!(
            Account,
            r#"
            SELECT
                id, label, clientId, clientSecret, refreshToken, accessToken, other,
                last_refresh_time, last_refresh_status, created_at, updated_at,
                enabled, error_count, success_count
            FROM accounts
            WHERE id = ?1
            "#,
            id
        )
        .fetch_optional(self.pool)
        .await
    }

    pub async fn list_all(&self) -> Result<Vec<Account>, sqlx_core::Error> {
        query_as!(
            Account,
            r#"
            SELECT
                id, label, clientId, clientSecret, refreshToken, accessToken, other,
                last_refresh_time, last_refresh_status, created_at, updated_at,
                enabled, error_count, success_count
            FROM accounts
            ORDER BY created_at DESC
            "#
        )
        .fetch_all(self.pool)
        .await
    }

    pub async fn list_retry_candidates(&self) -> Result<Vec<Account>, sqlx_core::Error> {
        query_as!(
            Account,
            r#"
            SELECT
                id, label, clientId, clientSecret, refreshToken, accessToken, other,
                last_refresh_time, last_refresh_status, created_at, updated_at,
                enabled, error_count, success_count
            FROM accounts
            WHERE enabled = 0 AND last_refresh_status = ?1
            ORDER BY created_at DESC
            "#,
            RefreshStatus::Failed.as_str()
        )
        .fetch_all(self.pool)
        .await
    }

    pub async fn count_all(&self) -> Result<i64, sqlx_core::Error> {
        query_scalar!(i64, r#"SELECT COUNT(*) FROM accounts"#)
            .fetch_one(self.pool)
            .await
    }

    pub async fn count_disabled(&self) -> Result<i64, sqlx_core::Error> {
        query_scalar!(i64, r#"SELECT COUNT(*) FROM accounts WHERE enabled = 0"#)
            .fetch_one(self.pool)
            .await
    }

    /// Removes disabled accounts that never served a successful call.
    pub async fn delete_disabled_unused(&self) -> Result<u64, sqlx_core::Error> {
        query!(r#"DELETE FROM accounts WHERE enabled = 0 AND success_count = 0"#)
            .execute(self.pool)
            .await
            .map(|result| result.rows_affected())
    }

    /// Re-enables every disabled account. Counters are preserved.
    pub async fn enable_all_disabled(&self, at: &str) -> Result<u64, sqlx_core::Error> {
        query!(
            r#"
            UPDATE accounts
            SET enabled = 1,
                updated_at = ?1
            WHERE enabled = 0
            "#,
            at
        )
        .execute(self.pool)
        .await
        .map(|result| result.rows_affected())
    }

    pub async fn record_refresh_success(
        &self,
        id: &str,
        access_token: &str,
        refresh_token: &str,
        at: &str,
    ) -> Result<u64, sqlx_core::Error> {
        query!(
            r#"
            UPDATE accounts
            SET accessToken = ?2,
                refreshToken = ?3,
                last_refresh_time = ?4,
                last_refresh_status = ?5,
                updated_at = ?4,
                enabled = 1,
                error_count = 0
            WHERE id = ?1
            "#,
            id,
            access_token,
            refresh_token,
            at,
            RefreshStatus::Success.as_str()
        )
        .execute(self.pool)
        .await
        .map(|result| result.rows_affected())
    }

    pub async fn record_refresh_failure(&self, id: &str, at: &str) -> Result<u64, sqlx_core::Error> {
        query!(
            r#"
            UPDATE accounts
            SET last_refresh_time = ?2,
                last_refresh_status = ?3,
                updated_at = ?2
            WHERE id = ?1
            "#,
            id,
            at,
            RefreshStatus::Failed.as_str()
        )
        .execute(self.pool)
        .await
        .map(|result| result.rows_affected())
    }
}
