use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::api::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    /// The backend answered and refused the token.
    Invalid,
    /// No answer in time; the token may or may not still be good.
    Unknown,
}

/// Asks `GET /auth/check` whether a bearer token is still accepted.
#[derive(Clone)]
pub struct SessionGuard {
    api: ApiClient,
    timeout: Duration,
}

impl SessionGuard {
    pub fn new(api: ApiClient, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    pub async fn check(&self, token: &str) -> SessionStatus {
        if token.is_empty() {
            return SessionStatus::Invalid;
        }

        let result = self
            .api
            .http()
            .get(self.api.url("/auth/check"))
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!("token accepted");
                SessionStatus::Valid
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Token validation failed");
                SessionStatus::Invalid
            }
            Err(e) => {
                warn!("Token check error: {}", e);
                SessionStatus::Unknown
            }
        }
    }

    /// Single yes/no answer: anything short of a `200` counts as invalid.
    pub async fn is_session_valid(&self, token: &str) -> bool {
        self.check(token).await == SessionStatus::Valid
    }
}
