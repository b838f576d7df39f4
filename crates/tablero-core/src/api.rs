//! HTTP client for the remote panel service.
//!
//! Thin request/response wrapper around the four panel endpoints. Every
//! operation is a single attempt with the transport-default timeout; the
//! caller decides what a failure means for the UI.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ActuatorKind, ActuatorState, Reading};
use crate::util::{compact_text, is_http_url};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Username or password was rejected by the server.")]
    Credentials,
    #[error("The session is no longer valid.")]
    SessionExpired,
    #[error("No response from the server: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Actuator command failed: {0}")]
    Actuator(String),
    #[error("Failed to fetch readings: {0}")]
    Fetch(String),
}

/// Client for the panel service behind a single fixed base URL.
#[derive(Debug, Clone)]
pub struct PanelApiClient {
    base_url: String,
    client: Client,
}

impl PanelApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url.into().as_str())?;
        let client = Client::builder()
            .build()
            .map_err(|_| ApiError::InvalidConfiguration("failed to initialize HTTP client"))?;
        Ok(Self { base_url, client })
    }

    /// Returns the normalized base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for an opaque session token.
    ///
    /// The caller is responsible for persisting the returned token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let payload = serde_json::json!({
            "usuario": username,
            "contraseña": password,
        });
        let response = self
            .client
            .post(format!("{}/api/login", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Credentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server(summarize_error_body(status, &body)));
        }

        let payload = response
            .json::<LoginResponse>()
            .await
            .map_err(|error| ApiError::Server(format!("malformed login response: {error}")))?;
        crate::util::normalize_text_option(payload.token)
            .ok_or_else(|| ApiError::Server("login response did not include a token".to_string()))
    }

    /// Command an actuator on or off.
    ///
    /// Returns the service acknowledgement message; the client-side state
    /// flag must only flip after this returns `Ok`.
    pub async fn set_actuator(
        &self,
        kind: ActuatorKind,
        state: ActuatorState,
        token: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, kind.command_path()))
            .bearer_auth(token)
            .json(&serde_json::json!({ "state": state }))
            .send()
            .await
            .map_err(|error| ApiError::Actuator(format!("no response from the server: {error}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Actuator(summarize_error_body(status, &body)));
        }

        let payload = response
            .json::<AckResponse>()
            .await
            .map_err(|error| ApiError::Actuator(format!("malformed acknowledgement: {error}")))?;
        crate::util::normalize_text_option(payload.message).ok_or_else(|| {
            ApiError::Actuator("acknowledgement did not include a message".to_string())
        })
    }

    /// Remote half of logout. Callers must treat failure as non-fatal and
    /// clear local session state regardless of the outcome.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/logout", self.base_url))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server(summarize_error_body(status, &body)));
        }
        Ok(())
    }

    /// Fetch the full set of sensor readings. No pagination.
    pub async fn fetch_readings(&self, token: &str) -> Result<Vec<Reading>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/lecturas", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|error| ApiError::Fetch(format!("no response from the server: {error}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Fetch(summarize_error_body(status, &body)));
        }

        response
            .json::<Vec<Reading>>()
            .await
            .map_err(|error| ApiError::Fetch(format!("malformed readings payload: {error}")))
    }
}

pub fn normalize_base_url(url: &str) -> Result<String, ApiError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must include http:// or https://",
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PanelErrorResponse {
    message: Option<String>,
    error: Option<String>,
}

fn summarize_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PanelErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("api.example.com").is_err());
    }

    #[test]
    fn client_exposes_normalized_base_url() {
        let client = PanelApiClient::new(" https://api.example.com/ ").unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn summarize_error_body_prefers_json_message() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let summary = summarize_error_body(status, r#"{"message": "boiler overheated"}"#);
        assert_eq!(summary, "boiler overheated (500)");
    }

    #[test]
    fn summarize_error_body_falls_back_to_raw_text() {
        let status = StatusCode::BAD_GATEWAY;
        assert_eq!(summarize_error_body(status, ""), "HTTP 502");
        assert_eq!(
            summarize_error_body(status, "upstream offline"),
            "upstream offline (502)"
        );
    }

    #[test]
    fn login_response_token_must_be_non_empty() {
        let payload: LoginResponse = serde_json::from_str(r#"{"token": "  "}"#).unwrap();
        assert_eq!(crate::util::normalize_text_option(payload.token), None);

        let payload: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(
            crate::util::normalize_text_option(payload.token),
            Some("abc".to_string())
        );
    }
}
