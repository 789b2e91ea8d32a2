//! A text annotation on a pin.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const TEXT_MAX_LEN: usize = 500;

/// A row of the `comments` table. Comments are immutable once written.
#[derive(Clone, FromRow, Debug)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
    pub pin_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A comment joined with its author's username.
#[derive(Clone, FromRow, Debug)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,

    pub author_username: String,
}
