//! HTTP handlers for `/comments`.

use crate::{
    dto::comment::{CommentCreateRequest, CommentView},
    errors::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST `/comments/add`
pub async fn add_comment(
    State(state): State<AppState>,
    Json(req): Json<CommentCreateRequest>,
) -> Result<Json<CommentView>, AppError> {
    let comment = state
        .comments
        .add(&req.text, req.user_id, req.pin_id)
        .await?;
    Ok(Json(comment))
}

/// GET `/comments/pins/{pin_id}`
pub async fn list_pin_comments(
    State(state): State<AppState>,
    Path(pin_id): Path<i64>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    Ok(Json(state.comments.list_by_pin(pin_id).await?))
}

/// DELETE `/comments/{comment_id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.comments.delete(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
