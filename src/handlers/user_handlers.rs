//! HTTP handlers for `/users`.

use crate::{
    dto::user::{LoginRequest, UserRequest, UserView},
    errors::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST `/users/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserView>, AppError> {
    let user = state
        .users
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok(Json(user))
}

/// POST `/users/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserView>, AppError> {
    let user = state
        .users
        .login(&req.username_or_email, &req.password)
        .await?;
    Ok(Json(user))
}

/// GET `/users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, AppError> {
    Ok(Json(state.users.list_all().await?))
}

/// GET `/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(state.users.get_by_id(id).await?))
}

/// PUT `/users/{id}` — full overwrite of username, email, and password.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserView>, AppError> {
    let user = state
        .users
        .update(id, &req.username, &req.email, &req.password)
        .await?;
    Ok(Json(user))
}

/// DELETE `/users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
