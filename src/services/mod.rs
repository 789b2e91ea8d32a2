//! Domain services: existence and uniqueness rules on top of the repositories,
//! plus mapping from entities to response views.

pub mod comment_service;
pub mod pin_service;
pub mod user_service;

use argon2::password_hash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{resource} not found with id: {id}")]
    NotFound { resource: &'static str, id: i64 },
    #[error("{0}")]
    Conflict(String),
    #[error("invalid username/email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] password_hash::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

/// Reject empty values when `required`, and values longer than `max` characters.
pub(crate) fn ensure_len(
    field: &str,
    value: &str,
    max: usize,
    required: bool,
) -> ServiceResult<()> {
    if required && value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(ServiceError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
