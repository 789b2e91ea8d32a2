//! Thin data-access layer over the SQLite pool.
//!
//! Repositories return raw `sqlx::Error`s; turning "no row" into a domain
//! error is the services' job.

pub mod comment_repository;
pub mod pin_repository;
pub mod user_repository;

/// Return true if SQLx error indicates a unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}
