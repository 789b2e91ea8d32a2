//! A geo-tagged record owned by a user.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const IMAGE_URL_MAX_LEN: usize = 1000;

/// A row of the `pins` table.
#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Pin {
    pub id: i64,

    pub title: String,

    pub description: String,

    /// Degrees; no range is enforced.
    pub latitude: f64,

    pub longitude: f64,

    pub image_url: Option<String>,

    /// Owning user.
    pub user_id: i64,

    pub created_at: DateTime<Utc>,
}

/// A pin joined with its owner's username.
#[derive(Clone, FromRow, Debug)]
pub struct PinWithOwner {
    #[sqlx(flatten)]
    pub pin: Pin,

    pub owner_username: String,
}
