#[cfg(feature = "sqlite")]
use sqlx_core::from_row::FromRow;
#[cfg(feature = "sqlite")]
use sqlx_core::row::Row;
#[cfg(feature = "sqlite")]
use sqlx_sqlite::SqliteRow;

#[cfg(feature = "sqlite")]
use super::*;

/// Values outside the known set decode as `None` with a warning.
#[cfg(feature = "sqlite")]
fn parse_status(id: &str, value: Option<String>) -> Option<RefreshStatus> {
    match value.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => match value.parse::<RefreshStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!(
                    event = "unknown_refresh_status",
                    account_id = %id,
                    error = %err
                );
                None
            }
        },
    }
}

#[cfg(feature = "sqlite")]
impl FromRow<'_, SqliteRow> for Account {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx_core::Error> {
        let status: Option<String> = row.try_get("last_refresh_status")?;
        let error_count: Option<i64> = row.try_get("error_count")?;
        let success_count: Option<i64> = row.try_get("success_count")?;
        let enabled: Option<i64> = row.try_get("enabled")?;
        let id: String = row.try_get("id")?;
        let last_refresh_status = parse_status(&id, status);
        Ok(Self {
            id,
            label: row.try_get("label")?,
            enabled: enabled.unwrap_or(0) != 0,
            client_id: row.try_get("clientId")?,
            client_secret: row.try_get("clientSecret")?,
            refresh_token: row.try_get("refreshToken")?,
            access_token: row.try_get("accessToken")?,
            other: row.try_get("other")?,
            last_refresh_time: row.try_get("last_refresh_time")?,
            last_refresh_status,
            error_count: error_count.unwrap_or(0),
            success_count: success_count.unwrap_or(0),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
