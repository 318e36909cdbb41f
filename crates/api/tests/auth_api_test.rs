//! HTTP tests for login, registration and the profile route.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, USER_EMAIL, USER_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login_returns_usable_token() {
    let app = TestApp::new().await;
    let payload = json!({"email": USER_EMAIL, "password": USER_PASSWORD});

    let (status, body) = app
        .send(Method::POST, "/api/login", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"]["email"], USER_EMAIL);

    let token = body["access_token"].as_str().expect("token string");
    let (status, profile) = app.send(Method::GET, "/api/user", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], app.user_id);
    assert_eq!(profile["name"], "Demo User");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let payload = json!({"email": USER_EMAIL, "password": "wrong-password"});

    let (status, body) = app
        .send(Method::POST, "/api/login", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;
    let payload = json!({"email": "ghost@example.com", "password": USER_PASSWORD});

    let (status, _) = app
        .send(Method::POST, "/api/login", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/api/login", None, Some("{}".to_string()))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_register_creates_user_and_token() {
    let app = TestApp::new().await;
    let payload = json!({"name": "Ana", "email": "ana@example.com", "password": "secret123"});

    let (status, body) = app
        .send(Method::POST, "/api/register", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], "Ana");
    assert!(body["access_token"].is_string());

    let login = json!({"email": "ana@example.com", "password": "secret123"});
    let (status, _) = app
        .send(Method::POST, "/api/login", None, Some(login.to_string()))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let payload = json!({"name": "Other", "email": USER_EMAIL, "password": "secret123"});

    let (status, body) = app
        .send(Method::POST, "/api/register", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["email"][0], "El email ya ha sido registrado.");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new().await;
    let payload = json!({"name": "Ana", "email": "ana@example.com", "password": "123"});

    let (status, body) = app
        .send(Method::POST, "/api/register", None, Some(payload.to_string()))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["password"].is_array());
}
