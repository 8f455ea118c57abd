//! Registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};
use hamyon_core::auth::{hash_password, normalize_email, validate_password, verify_password};
use hamyon_db::{UserRepository, entities::users};
use hamyon_shared::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

fn token_response(state: &AppState, user: users::Model) -> ApiResult<LoginResponse> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)?;

    Ok(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let Ok(email) = normalize_email(&payload.email) else {
        return Err(invalid_credentials());
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !user.is_active {
        return Err(ApiError::unauthorized("This account has been disabled"));
    }

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    info!(user_id = %user.id, "User logged in successfully");
    Ok((StatusCode::OK, Json(token_response(&state, user)?)))
}

/// POST /auth/register - Register a new user and return an access token.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email)?;
    validate_password(&payload.password)?;

    let password_hash = hash_password(&payload.password)?;
    let user = UserRepository::new((*state.db).clone())
        .create(&email, &password_hash, payload.full_name.trim())
        .await?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(token_response(&state, user)?)))
}
