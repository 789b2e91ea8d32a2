//! Persisted entities for the pinboard service.
//!
//! Each entity maps one-to-one onto a table via `sqlx::FromRow`. Entities are
//! never serialized to clients directly; see `crate::dto` for the wire shapes.

pub mod comment;
pub mod pin;
pub mod user;
