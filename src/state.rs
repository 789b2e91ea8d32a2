use crate::services::{
    comment_service::CommentService, pin_service::PinService, user_service::UserService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared state handed to every handler. Each service is built once at
/// startup around the same pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SqlitePool>,
    pub users: UserService,
    pub pins: PinService,
    pub comments: CommentService,
}

impl AppState {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            users: UserService::new(db.clone()),
            pins: PinService::new(db.clone()),
            comments: CommentService::new(db.clone()),
            db,
        }
    }
}
