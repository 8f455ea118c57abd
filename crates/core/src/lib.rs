//! Core business logic for Hamyon.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `currency` - Fixed rate table and conversion through the base currency
//! - `period` - Chart and statistics date windows
//! - `transaction` - Transaction kinds, records and input validation
//! - `category` - Category types and defaults
//! - `dashboard` - Summary, chart and category aggregation
//! - `auth` - Password hashing and credential policy

pub mod auth;
pub mod category;
pub mod currency;
pub mod dashboard;
pub mod period;
pub mod transaction;
