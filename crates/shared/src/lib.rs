//! Shared types, errors, and configuration for Hamyon.
//!
//! This crate provides common types used across all other crates:
//! - Supported currency codes
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, DashboardConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
pub use types::Currency;
