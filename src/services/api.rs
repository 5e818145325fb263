use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::api::ApiConfig;
use crate::modules::auth::crud::{SessionStore, SessionStoreError};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("You must be logged in to use the chat service")]
    Unauthenticated,
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    #[error("Server error: {message}")]
    ServerError { status: u16, message: String },
    #[error("No response from server. Please check your connection.")]
    NetworkUnreachable(#[source] reqwest::Error),
    #[error("Request timed out. The server may be busy. Please try again.")]
    TimedOut,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}

impl TransportError {
    /// Errors after which the caller should send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired)
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::NetworkUnreachable(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub fn encode<T: Serialize>(payload: &T) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(|e| TransportError::Validation(e.to_string()))
}

/// Decodes a JSON value already returned by [`ApiClient`] into a typed payload.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::InvalidResponse(e.to_string()))
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    sessions: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Sends an authenticated request with an explicit bearer token.
    ///
    /// A missing token fails with [`TransportError::Unauthenticated`] before
    /// anything goes on the wire. Both that and a `401` clear the stored token.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, TransportError> {
        let result = self.send_with_token(method, endpoint, payload, token).await;

        if let Err(e) = &result {
            if e.requires_login() {
                warn!(endpoint, "request rejected, dropping stored token");
                if let Err(store_err) = self.sessions.invalidate() {
                    error!("Failed to invalidate session: {}", store_err);
                }
            }
        }

        result
    }

    /// Same as [`ApiClient::send`], with the token read fresh from the session store.
    pub async fn send_authed(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let token = self.current_token();
        self.send(method, endpoint, payload, token.as_deref()).await
    }

    pub fn current_token(&self) -> Option<String> {
        match self.sessions.load() {
            Ok(session) => session.token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read session: {}", e);
                None
            }
        }
    }

    /// JSON post without credentials, used by login and registration. A `401`
    /// here is a plain server error, not an expired session.
    pub async fn post_public<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<Value, TransportError> {
        debug!(endpoint, "POST (public)");

        let response = self
            .client
            .post(self.url(endpoint))
            .json(payload)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        Self::read_json(response, false).await
    }

    /// Multipart post without credentials, aborted once `timeout` elapses.
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        form: Form,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        debug!(endpoint, timeout_ms = timeout.as_millis() as u64, "POST multipart");

        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        Self::read_json(response, false).await
    }

    async fn send_with_token(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, TransportError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(TransportError::Unauthenticated)?;

        debug!(method = method.as_str(), endpoint, "sending request");

        let mut request = self
            .client
            .request(method, self.url(endpoint))
            .bearer_auth(token);

        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request.send().await.map_err(TransportError::from_reqwest)?;

        Self::read_json(response, true).await
    }

    async fn read_json(response: Response, authenticated: bool) -> Result<Value, TransportError> {
        let status = response.status();

        if authenticated && status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::SessionExpired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = server_message(status, &body);
            error!(status = status.as_u16(), "API error: {}", message);
            return Err(TransportError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(TransportError::from_reqwest)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            if !message.is_empty() {
                return message;
            }
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
