//! Conversion of domain errors into JSON error responses.
//!
//! Every error body has the shape `{"error": "<code>", "message": "<text>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use hamyon_core::auth::{CredentialError, PasswordError};
use hamyon_core::category::CategoryError as CategoryRuleError;
use hamyon_core::currency::CurrencyError;
use hamyon_core::period::PeriodError;
use hamyon_core::transaction::TransactionError as TransactionRuleError;
use hamyon_db::repositories::{CategoryError, DashboardError, TransactionError, UserError};
use hamyon_shared::{AppError, JwtError};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An [`AppError`] that renders as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<CurrencyError> for ApiError {
    fn from(err: CurrencyError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<TransactionRuleError> for ApiError {
    fn from(err: TransactionRuleError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CategoryRuleError> for ApiError {
    fn from(err: CategoryRuleError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self(AppError::Conflict(
                "An account with this email already exists".to_string(),
            )),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::not_found("Category not found"),
            CategoryError::Shared(_) => Self(AppError::Forbidden(
                "Shared categories cannot be modified".to_string(),
            )),
            CategoryError::DuplicateName(name) => {
                Self(AppError::Conflict(format!("Category already exists: {name}")))
            }
            CategoryError::InvalidData { .. } => Self(AppError::Internal(err.to_string())),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::not_found("Transaction not found"),
            TransactionError::CategoryNotFound(_) => Self::not_found("Category not found"),
            TransactionError::Rule(rule) => rule.into(),
            TransactionError::InvalidData { .. } => Self(AppError::Internal(err.to_string())),
            TransactionError::Database(e) => e.into(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::InvalidData { .. } => Self(AppError::Internal(err.to_string())),
            DashboardError::Database(e) => e.into(),
        }
    }
}
