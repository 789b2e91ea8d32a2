//! CommentService — annotate pins and read the discussion back.

use crate::{
    dto::comment::CommentView,
    models::comment::TEXT_MAX_LEN,
    repositories::{
        comment_repository::CommentRepository, pin_repository::PinRepository,
        user_repository::UserRepository,
    },
    services::{ServiceError, ServiceResult, ensure_len},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    users: UserRepository,
    pins: PinRepository,
}

impl CommentService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            comments: CommentRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            pins: PinRepository::new(db),
        }
    }

    /// Attach a comment by `user_id` to `pin_id`. Both must exist; nothing is
    /// written otherwise.
    pub async fn add(&self, text: &str, user_id: i64, pin_id: i64) -> ServiceResult<CommentView> {
        ensure_len("text", text, TEXT_MAX_LEN, true)?;

        let author = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;
        if !self.pins.exists_by_id(pin_id).await? {
            return Err(ServiceError::not_found("Pin", pin_id));
        }

        let comment = self
            .comments
            .insert(text, user_id, pin_id, Utc::now())
            .await?;

        info!(comment_id = comment.id, pin_id, user_id, "added comment");
        Ok(CommentView {
            id: comment.id,
            text: comment.text,
            user_id: comment.user_id,
            username: author.username,
            pin_id: comment.pin_id,
            created_at: comment.created_at,
        })
    }

    /// All comments on a pin, most recent first.
    pub async fn list_by_pin(&self, pin_id: i64) -> ServiceResult<Vec<CommentView>> {
        if !self.pins.exists_by_id(pin_id).await? {
            return Err(ServiceError::not_found("Pin", pin_id));
        }
        Ok(self
            .comments
            .find_by_pin_id_newest_first(pin_id)
            .await?
            .into_iter()
            .map(CommentView::from)
            .collect())
    }

    pub async fn delete(&self, comment_id: i64) -> ServiceResult<()> {
        if !self.comments.exists_by_id(comment_id).await? {
            return Err(ServiceError::not_found("Comment", comment_id));
        }
        self.comments.delete_by_id(comment_id).await?;
        debug!(comment_id, "deleted comment");
        Ok(())
    }
}
