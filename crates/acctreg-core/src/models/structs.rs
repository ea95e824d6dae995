use serde::{Deserialize, Serialize};

use super::enums::RefreshStatus;

const SHORT_ID_LEN: usize = 8;

/// One row of the `accounts` registry table.
///
/// Timestamps are stored as `%Y-%m-%dT%H:%M:%S` UTC strings (see
/// [`crate::format_timestamp`]) and are kept as text so rows written by other
/// tools round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub label: Option<String>,
    pub enabled: bool,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub other: Option<String>,
    pub last_refresh_time: Option<String>,
    pub last_refresh_status: Option<RefreshStatus>,
    pub error_count: i64,
    pub success_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// The credential triple required for a refresh-token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Account {
    /// Label for operator output: the configured label, or a short id prefix.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => short_id(&self.id),
        }
    }

    /// Returns the refresh credentials only when all three parts are present
    /// and non-blank.
    pub fn refresh_credentials(&self) -> Option<RefreshCredentials> {
        Some(RefreshCredentials {
            client_id: non_blank(self.client_id.as_deref())?,
            client_secret: non_blank(self.client_secret.as_deref())?,
            refresh_token: non_blank(self.refresh_token.as_deref())?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
