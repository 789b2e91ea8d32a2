//! A registered account.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

pub const USERNAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;

/// A row of the `users` table.
///
/// `password` holds an Argon2 PHC string, never the plaintext.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,

    /// Unique login name.
    pub username: String,

    /// Unique e-mail address, also accepted as a login name.
    pub email: String,

    pub password: String,

    pub created_at: DateTime<Utc>,

    /// Set on every successful profile update.
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("last_updated_at", &self.last_updated_at)
            .finish()
    }
}
