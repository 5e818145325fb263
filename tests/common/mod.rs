#![allow(dead_code)]

use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use fashion_assistant::config::api::ApiConfig;
use fashion_assistant::modules::auth::crud::MemorySessionStore;
use fashion_assistant::modules::auth::model::Session;
use fashion_assistant::AppState;

pub const TOKEN: &str = "test-token";

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn logged_in() -> Session {
    Session {
        token: Some(TOKEN.to_string()),
        email: Some("kim@example.com".to_string()),
        username: Some("kim".to_string()),
        user_id: Some("u-1".to_string()),
        style_profile: None,
    }
}

pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        session_check_timeout: Duration::from_millis(300),
        tryon_timeout: Duration::from_millis(300),
        token_check_interval: Duration::from_millis(50),
        ..ApiConfig::with_base_url(base_url)
    }
}

pub fn app_state(config: ApiConfig, session: Session) -> (AppState, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new(session));
    let state = AppState::new(config, store.clone()).unwrap();
    (state, store)
}

pub fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}
