use acctreg_core::{RefreshCredentials, RefreshOutcome, TokenRefresher};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use super::types::{TokenRequest, TokenRequestError, TokenResponse};

const SDK_USER_AGENT: &str = "aws-sdk-rust/1.3.9 os/windows lang/rust/1.87.0";
const AMZ_USER_AGENT: &str = "aws-sdk-rust/1.3.9 ua/2.1 api/ssooidc/1.88.0 os/windows lang/rust/1.87.0 m/E app/AmazonQ-For-CLI";
const AMZ_SDK_REQUEST: &str = "attempt=1; max=3";

/// Refresh-token grant client for the OIDC token endpoint. One instance (and
/// its connection pool) is shared by a whole batch.
pub(crate) struct OidcTokenClient {
    client: reqwest::Client,
    token_url: Url,
}

impl OidcTokenClient {
    pub(crate) fn new(client: reqwest::Client, token_url: Url) -> Self {
        Self { client, token_url }
    }

    pub(crate) async fn request_token(
        &self,
        credentials: &RefreshCredentials,
    ) -> Result<TokenResponse, TokenRequestError> {
        let start = std::time::Instant::now();
        let response = self
            .client
            .post(self.token_url.clone())
            .headers(oidc_headers()?)
            .json(&TokenRequest::refresh(credentials))
            .send()
            .await
            .map_err(TokenRequestError::Transport)?;
        let status = response.status();
        debug!(
            url = %self.token_url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "token response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenRequestError::from_status(status, &body));
        }

        let token: TokenResponse = response.json().await.map_err(TokenRequestError::Decode)?;
        match token.access_token.as_deref() {
            Some(value) if !value.trim().is_empty() => Ok(token),
            _ => Err(TokenRequestError::MissingAccessToken),
        }
    }
}

#[async_trait]
impl TokenRefresher for OidcTokenClient {
    async fn refresh(&self, credentials: &RefreshCredentials) -> RefreshOutcome {
        match self.request_token(credentials).await {
            Ok(TokenResponse {
                access_token: Some(access_token),
                refresh_token,
            }) => RefreshOutcome::Success {
                access_token,
                refresh_token: refresh_token.filter(|value| !value.trim().is_empty()),
            },
            Ok(_) => RefreshOutcome::failure(TokenRequestError::MissingAccessToken.reason()),
            Err(err) => {
                warn!(
                    event = "token_request_failed",
                    status = ?err.status(),
                    error = ?err
                );
                RefreshOutcome::failure(err.reason())
            }
        }
    }
}

fn oidc_headers() -> Result<HeaderMap, TokenRequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
    headers.insert(
        HeaderName::from_static("x-amz-user-agent"),
        HeaderValue::from_static(AMZ_USER_AGENT),
    );
    headers.insert(
        HeaderName::from_static("amz-sdk-request"),
        HeaderValue::from_static(AMZ_SDK_REQUEST),
    );
    headers.insert(
        HeaderName::from_static("amz-sdk-invocation-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string())?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn credentials() -> RefreshCredentials {
        RefreshCredentials {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "rt-old".to_string(),
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> OidcTokenClient {
        let url = Url::parse(&format!("{}/token", server.url())).expect("url");
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client");
        OidcTokenClient::new(http, url)
    }

    #[tokio::test]
    async fn success_returns_new_tokens() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_header("content-type", "application/json")
            .match_header("amz-sdk-request", "attempt=1; max=3")
            .match_header("amz-sdk-invocation-id", Matcher::Any)
            .match_header("x-amz-user-agent", Matcher::Regex("ssooidc".to_string()))
            .match_body(Matcher::Json(json!({
                "grantType": "refresh_token",
                "clientId": "cid",
                "clientSecret": "secret",
                "refreshToken": "rt-old",
            })))
            .with_status(200)
            .with_body(json!({"accessToken": "at-new", "refreshToken": "rt-new"}).to_string())
            .create_async()
            .await;

        let outcome = client_for(&server).refresh(&credentials()).await;
        mock.assert_async().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Success {
                access_token: "at-new".to_string(),
                refresh_token: Some("rt-new".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn success_without_rotation_leaves_refresh_token_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body(json!({"accessToken": "at-new"}).to_string())
            .create_async()
            .await;

        let outcome = client_for(&server).refresh(&credentials()).await;
        assert_eq!(
            outcome,
            RefreshOutcome::Success {
                access_token: "at-new".to_string(),
                refresh_token: None,
            }
        );
    }

    #[tokio::test]
    async fn error_status_surfaces_error_description() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(json!({"error_description": "invalid_grant"}).to_string())
            .create_async()
            .await;

        let outcome = client_for(&server).refresh(&credentials()).await;
        assert_eq!(outcome, RefreshOutcome::failure("invalid_grant"));
    }

    #[tokio::test]
    async fn success_status_without_access_token_is_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body(json!({"refreshToken": "rt-new"}).to_string())
            .create_async()
            .await;

        let outcome = client_for(&server).refresh(&credentials()).await;
        assert_eq!(
            outcome,
            RefreshOutcome::failure("token response did not contain accessToken")
        );
    }

    #[tokio::test]
    async fn undecodable_body_is_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let outcome = client_for(&server).refresh(&credentials()).await;
        let RefreshOutcome::Failure { reason } = outcome else {
            panic!("expected failure");
        };
        assert!(reason.starts_with("invalid token response: "), "{reason}");
    }

    #[tokio::test]
    async fn transport_error_is_failure() {
        let url = Url::parse("http://127.0.0.1:9/token").expect("url");
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("client");
        let outcome = OidcTokenClient::new(http, url)
            .refresh(&credentials())
            .await;
        let RefreshOutcome::Failure { reason } = outcome else {
            panic!("expected failure");
        };
        assert!(reason.starts_with("token request failed: "), "{reason}");
        assert!(
            reason.to_lowercase().contains("connection refused"),
            "missing root cause in {reason}"
        );
    }
}
