//! Authentication helpers.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Password and email policy checks for registration

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use thiserror::Error;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Email is not of the form `local@domain`.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Password is shorter than `MIN_PASSWORD_LEN`.
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
}

/// Lowercases and trims an email, rejecting obviously malformed ones.
pub fn normalize_email(email: &str) -> Result<String, CredentialError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(CredentialError::InvalidEmail);
    }
    Ok(email)
}

/// Checks the password policy.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}
