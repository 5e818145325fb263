use reqwest::Method;
use tracing::{info, warn};
use validator::Validate;

use crate::modules::auth::{
    model::Session,
    schema::{
        first_validation_message, AuthResponse, LoginRequest, RegisterRequest,
        RegisterResponse, StyleProfileResponse,
    },
};
use crate::services::api::{decode, TransportError};
use crate::AppState;

fn validate<T: Validate>(payload: &T) -> Result<(), TransportError> {
    payload
        .validate()
        .map_err(|e| TransportError::Validation(first_validation_message(&e)))
}

/// Exchanges credentials for a token and persists the new session.
pub async fn login(state: &AppState, payload: LoginRequest) -> Result<Session, TransportError> {
    validate(&payload)?;

    let value = state.api.post_public("/api/login", &payload).await?;
    let auth: AuthResponse = decode(value)?;

    let session = Session {
        token: Some(auth.token),
        email: Some(auth.email),
        username: auth.username,
        user_id: auth.user_id,
        style_profile: None,
    };

    state.sessions().save(&session)?;
    info!(email = session.email.as_deref().unwrap_or_default(), "logged in");

    Ok(session)
}

/// Creates an account. Does not log in; the caller sends the user to login.
pub async fn register(
    state: &AppState,
    payload: RegisterRequest,
) -> Result<String, TransportError> {
    validate(&payload)?;

    let value = state.api.post_public("/api/register", &payload).await?;
    let response: RegisterResponse = decode(value)?;

    Ok(response
        .message
        .unwrap_or_else(|| "User registered successfully!".to_string()))
}

pub fn logout(state: &AppState) -> Result<(), TransportError> {
    state.sessions().clear()?;
    info!("logged out");
    Ok(())
}

/// Fetches the user's style profile and caches it in the session.
pub async fn refresh_style_profile(
    state: &AppState,
) -> Result<serde_json::Value, TransportError> {
    let value = state
        .api
        .send_authed(Method::GET, "/api/profile/style", None)
        .await?;
    let response: StyleProfileResponse = decode(value)?;

    let store = state.sessions();
    let mut session = store.load()?;
    if !session.is_authenticated() {
        warn!("session ended while fetching style profile");
        return Err(TransportError::SessionExpired);
    }

    session.style_profile = Some(response.data.clone());
    store.save(&session)?;

    Ok(response.data)
}
