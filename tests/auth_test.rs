mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{app_state, bearer, logged_in, spawn_backend, test_config, TOKEN};
use fashion_assistant::modules::auth::controller as auth;
use fashion_assistant::modules::auth::crud::SessionStore;
use fashion_assistant::modules::auth::model::Session;
use fashion_assistant::modules::auth::schema::{LoginRequest, RegisterRequest};
use fashion_assistant::services::api::TransportError;

fn auth_router(hits: Arc<AtomicUsize>) -> Router {
    let login_hits = hits.clone();
    let register_hits = hits;

    Router::new()
        .route(
            "/api/login",
            post(move |Json(body): Json<Value>| {
                let hits = login_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if body["password"] == "secret" {
                        Json(json!({
                            "token": TOKEN,
                            "email": body["email"],
                            "username": "kim",
                            "userId": "u-1"
                        }))
                        .into_response()
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "error": "Invalid credentials" })),
                        )
                            .into_response()
                    }
                }
            }),
        )
        .route(
            "/api/register",
            post(move |Json(body): Json<Value>| {
                let hits = register_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if body["email"] == "taken@example.com" {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(json!({ "error": "User already exists" })),
                        )
                            .into_response()
                    } else {
                        (StatusCode::CREATED, Json(json!({ "message": "Welcome aboard!" })))
                            .into_response()
                    }
                }
            }),
        )
        .route(
            "/api/profile/style",
            get(|headers: HeaderMap| async move {
                if bearer(&headers).as_deref() == Some(TOKEN) {
                    Json(json!({ "data": { "colors": ["black", "navy"] } })).into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }),
        )
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_persists_session() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, store) = app_state(test_config(&base), Session::default());

    let session = auth::login(&state, login("kim@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(session.token.as_deref(), Some(TOKEN));
    assert_eq!(session.user_id.as_deref(), Some("u-1"));
    assert_eq!(store.load().unwrap(), session);
}

#[tokio::test]
async fn test_bad_credentials_surface_server_message() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, store) = app_state(test_config(&base), Session::default());

    let err = auth::login(&state, login("kim@example.com", "wrong"))
        .await
        .unwrap_err();

    match err {
        TransportError::ServerError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!store.load().unwrap().is_authenticated());
}

#[tokio::test]
async fn test_malformed_login_is_rejected_locally() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(auth_router(hits.clone())).await;
    let (state, _) = app_state(test_config(&base), Session::default());

    let err = auth::login(&state, login("not-an-email", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Validation(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_backend(auth_router(hits.clone())).await;
    let (state, _) = app_state(test_config(&base), Session::default());

    let err = auth::register(
        &state,
        RegisterRequest {
            username: "kim".to_string(),
            email: "kim@example.com".to_string(),
            password: "123".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Password must be at least 6 characters");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_register_returns_backend_message() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, store) = app_state(test_config(&base), Session::default());

    let message = auth::register(
        &state,
        RegisterRequest {
            username: "kim".to_string(),
            email: "kim@example.com".to_string(),
            password: "123456".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(message, "Welcome aboard!");
    assert!(!store.load().unwrap().is_authenticated());
}

#[tokio::test]
async fn test_register_conflict_is_server_error() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, _) = app_state(test_config(&base), Session::default());

    let err = auth::register(
        &state,
        RegisterRequest {
            username: "kim".to_string(),
            email: "taken@example.com".to_string(),
            password: "123456".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Server error: User already exists");
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, store) = app_state(test_config(&base), logged_in());

    auth::logout(&state).unwrap();

    assert_eq!(store.load().unwrap(), Session::default());
}

#[tokio::test]
async fn test_style_profile_is_cached_in_session() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, store) = app_state(test_config(&base), logged_in());

    let profile = auth::refresh_style_profile(&state).await.unwrap();

    assert_eq!(profile["colors"][0], "black");
    assert_eq!(store.load().unwrap().style_profile, Some(profile));
}

#[tokio::test]
async fn test_style_profile_requires_login() {
    let base = spawn_backend(auth_router(Arc::default())).await;
    let (state, _) = app_state(test_config(&base), Session::default());

    let err = auth::refresh_style_profile(&state).await.unwrap_err();

    assert!(err.requires_login());
}
