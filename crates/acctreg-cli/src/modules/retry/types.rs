use acctreg_core::RefreshCredentials;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub(crate) const REFRESH_GRANT_TYPE: &str = "refresh_token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
}

impl<'a> TokenRequest<'a> {
    pub(crate) fn refresh(credentials: &'a RefreshCredentials) -> Self {
        Self {
            grant_type: REFRESH_GRANT_TYPE,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            refresh_token: &credentials.refresh_token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorResponse {
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    /// Extracts `error_description` from an error body, if the body is JSON
    /// and carries one.
    pub(crate) fn description(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|response| response.error_description)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum TokenRequestError {
    #[error("token request failed")]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid token response")]
    Decode(#[source] reqwest::Error),
    #[error("token response did not contain accessToken")]
    MissingAccessToken,
    #[error("invalid request header")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl TokenRequestError {
    pub(crate) fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) | Self::Decode(err) => err.status(),
            Self::MissingAccessToken | Self::Header(_) => None,
        }
    }

    /// Operator-facing reason including every underlying cause, e.g.
    /// `token request failed: error sending request ...: Connection refused`.
    pub(crate) fn reason(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }

    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = TokenErrorResponse::description(body)
            .unwrap_or_else(|| format!("token endpoint returned {status}"));
        Self::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case_grant() {
        let credentials = RefreshCredentials {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "rt".to_string(),
        };
        let body = serde_json::to_value(TokenRequest::refresh(&credentials)).expect("json");
        assert_eq!(
            body,
            serde_json::json!({
                "grantType": "refresh_token",
                "clientId": "cid",
                "clientSecret": "secret",
                "refreshToken": "rt",
            })
        );
    }

    #[test]
    fn status_error_prefers_error_description() {
        let err = TokenRequestError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"invalid_grant"}"#,
        );
        assert_eq!(err.to_string(), "invalid_grant");

        let err = TokenRequestError::from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "token endpoint returned 502 Bad Gateway");
    }

    #[test]
    fn reason_without_source_is_the_message() {
        let err = TokenRequestError::from_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.reason(), "token endpoint returned 401 Unauthorized");
        assert_eq!(
            TokenRequestError::MissingAccessToken.reason(),
            "token response did not contain accessToken"
        );
    }
}
