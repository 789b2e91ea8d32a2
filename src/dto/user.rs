use crate::{dto::pin::PinView, models::user::User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /users/register` and `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Sanitized user view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub pins: Vec<PinView>,
}

impl UserView {
    pub fn new(user: &User, pins: Vec<PinView>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            last_updated_at: user.last_updated_at,
            pins,
        }
    }
}
