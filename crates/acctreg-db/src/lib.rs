#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]

use sqlx_core::executor::Executor;
use sqlx_core::pool::{Pool, PoolOptions};
use sqlx_sqlite::{Sqlite, SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub mod accounts;

pub use accounts::AccountRepo;

pub type SqlitePool = Pool<Sqlite>;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.sqlite3";

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    label TEXT,
    clientId TEXT,
    clientSecret TEXT,
    refreshToken TEXT,
    accessToken TEXT,
    other TEXT,
    last_refresh_time TEXT,
    last_refresh_status TEXT,
    created_at TEXT,
    updated_at TEXT,
    enabled INTEGER DEFAULT 1,
    error_count INTEGER DEFAULT 0,
    success_count INTEGER DEFAULT 0
)
"#;

/// Opens an existing registry. A missing database file is an error.
pub async fn connect_sqlite(path: &str) -> Result<SqlitePool, sqlx_core::Error> {
    connect_sqlite_with_max(path, 1, false).await
}

/// Opens a registry, creating the database file when it does not exist.
pub async fn create_sqlite(path: &str) -> Result<SqlitePool, sqlx_core::Error> {
    connect_sqlite_with_max(path, 1, true).await
}

pub async fn connect_sqlite_with_max(
    path: &str,
    max_connections: u32,
    create_if_missing: bool,
) -> Result<SqlitePool, sqlx_core::Error> {
    let options = SqliteConnectOptions::from_str(path)?
        .create_if_missing(create_if_missing)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    debug!(path, max_connections, create_if_missing, "opening sqlite pool");
    PoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates the `accounts` table when it does not exist yet. Existing
/// registries are left untouched and no bookkeeping tables are written.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx_core::Error> {
    pool.execute(CREATE_ACCOUNTS_TABLE).await?;
    debug!("accounts schema ready");
    Ok(())
}
