use crate::models::comment::CommentWithAuthor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /comments/add`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateRequest {
    pub text: String,
    pub user_id: i64,
    pub pin_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
    pub username: String,
    pub pin_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentView {
    fn from(row: CommentWithAuthor) -> Self {
        let comment = row.comment;
        Self {
            id: comment.id,
            text: comment.text,
            user_id: comment.user_id,
            username: row.author_username,
            pin_id: comment.pin_id,
            created_at: comment.created_at,
        }
    }
}
