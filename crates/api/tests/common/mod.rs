//! Test harness: an in-memory database behind the full router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use hamyon_api::{AppState, create_router};
use hamyon_db::Migrator;
use hamyon_db::migration::MigratorTrait;
use hamyon_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

/// A router plus the state it was built from.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Builds the app on a fresh in-memory SQLite database.
    pub async fn new() -> Self {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        let jwt = JwtService::new(&JwtConfig {
            secret: "test-secret-key-that-is-long-enough".to_string(),
            access_token_expiry_secs: 3600,
        });

        let state = AppState {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt),
            timezone: chrono_tz::Asia::Tashkent,
            recent_limit: 5,
        };

        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    /// Sends a request and returns the status and parsed JSON body.
    ///
    /// Empty bodies parse as `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    /// GET with a token.
    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    /// POST with a token.
    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Registers a user and returns the access token and user ID.
    pub async fn register(&self, email: &str) -> (String, Uuid) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "email": email, "password": "password123", "full_name": "Test" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let token = body["access_token"].as_str().expect("token").to_string();
        let id = body["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("user id");
        (token, id)
    }

    /// Records a transaction dated `date` and returns its ID.
    pub async fn add_transaction(
        &self,
        token: &str,
        kind: &str,
        amount: &str,
        currency: &str,
        date: chrono::NaiveDate,
    ) -> Uuid {
        let (status, body) = self
            .post(
                "/api/transactions/",
                token,
                json!({
                    "type": kind,
                    "amount": amount,
                    "currency": currency,
                    "date": date.to_string(),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().and_then(|s| s.parse().ok()).expect("id")
    }
}

/// Reads a JSON number as a decimal.
pub fn decimal(value: &Value) -> Decimal {
    let number = value.as_f64().unwrap_or_else(|| panic!("not a number: {value}"));
    Decimal::try_from(number).expect("finite number")
}
