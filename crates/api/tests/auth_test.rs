//! Registration, login and bearer-token enforcement.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[rstest]
#[case("/api/dashboard/summary/")]
#[case("/api/dashboard/chart-data/")]
#[case("/api/dashboard/category-stats/")]
#[case("/api/transactions/")]
#[case("/api/categories/")]
#[case("/api/currencies/")]
#[tokio::test]
async fn test_protected_routes_require_token(#[case] uri: &str) {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = app.send(Method::GET, uri, Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("Dilnoza@Example.com").await;
    assert!(!token.is_empty());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "dilnoza@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.to_string());
    assert_eq!(body["user"]["email"], "dilnoza@example.com");
    assert_eq!(body["expires_in"], 3600);

    let (status, _) = app.get("/api/currencies/", body["access_token"].as_str().unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email() {
    let app = TestApp::new().await;
    app.register("user@example.com").await;

    for payload in [
        json!({ "email": "user@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "password123" }),
    ] {
        let (status, body) = app
            .send(Method::POST, "/api/auth/login", None, Some(payload))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_register_validation_and_conflict() {
    let app = TestApp::new().await;
    app.register("taken@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "taken@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "new@example.com", "password": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_currencies_lists_rate_table() {
    let app = TestApp::new().await;
    let (token, _) = app.register("rates@example.com").await;

    let (status, body) = app.get("/api/currencies/", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], "UZS");

    let currencies = body["currencies"].as_array().unwrap();
    assert_eq!(currencies.len(), 5);
    let usd = currencies.iter().find(|c| c["code"] == "USD").unwrap();
    assert_eq!(common::decimal(&usd["rate"]), rust_decimal_macros::dec!(12500));
}
