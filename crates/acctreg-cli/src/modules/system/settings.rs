use std::time::Duration;

use url::Url;

use crate::cli_args::Cli;

pub(crate) const DEFAULT_TOKEN_URL: &str = "https://oidc.us-east-1.amazonaws.com/token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    #[error("invalid proxy url {value:?}: {source}")]
    InvalidProxy {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid token url {value:?}: {source}")]
    InvalidTokenUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Run-wide settings, resolved once from flags and environment before any
/// command executes.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub database_url: String,
    pub token_url: Url,
    pub proxy: Option<Url>,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self, SettingsError> {
        Self::resolve(
            &cli.database_url,
            cli.token_url.as_deref(),
            cli.proxy.as_deref(),
            cli.delay_ms,
        )
    }

    fn resolve(
        database_url: &str,
        token_url: Option<&str>,
        proxy: Option<&str>,
        delay_ms: u64,
    ) -> Result<Self, SettingsError> {
        let token_url = non_empty(token_url).unwrap_or(DEFAULT_TOKEN_URL);
        let token_url =
            Url::parse(token_url).map_err(|source| SettingsError::InvalidTokenUrl {
                value: token_url.to_string(),
                source,
            })?;
        let proxy = non_empty(proxy)
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::InvalidProxy {
                    value: value.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            database_url: database_url.to_string(),
            token_url,
            proxy,
            retry_delay: Duration::from_millis(delay_ms),
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_use_fixed_endpoint_without_proxy() {
        let settings =
            Settings::resolve("sqlite://data.sqlite3", None, None, 1000).expect("settings");
        assert_eq!(settings.token_url.as_str(), DEFAULT_TOKEN_URL);
        assert!(settings.proxy.is_none());
        assert_eq!(settings.retry_delay, Duration::from_secs(1));
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn blank_proxy_means_direct_connection() {
        let settings =
            Settings::resolve("sqlite://data.sqlite3", None, Some("   "), 0).expect("settings");
        assert!(settings.proxy.is_none());
    }

    #[test]
    fn proxy_and_token_url_are_parsed() {
        let settings = Settings::resolve(
            "sqlite://data.sqlite3",
            Some("http://127.0.0.1:9999/token"),
            Some(" http://proxy.internal:3128 "),
            250,
        )
        .expect("settings");
        assert_eq!(settings.token_url.as_str(), "http://127.0.0.1:9999/token");
        assert_eq!(
            settings.proxy.as_ref().map(Url::as_str),
            Some("http://proxy.internal:3128/")
        );
        assert_eq!(settings.retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn invalid_proxy_is_rejected() {
        let err = Settings::resolve("sqlite://data.sqlite3", None, Some("not a url"), 0)
            .expect_err("invalid proxy");
        assert!(matches!(err, SettingsError::InvalidProxy { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn from_cli_reads_global_flags() {
        let cli = Cli::parse_from([
            "acctreg",
            "--database-url",
            "sqlite://registry.sqlite3",
            "--delay-ms",
            "5",
            "retry-failed",
        ]);
        let settings = Settings::from_cli(&cli).expect("settings");
        assert_eq!(settings.database_url, "sqlite://registry.sqlite3");
        assert_eq!(settings.retry_delay, Duration::from_millis(5));
    }
}
