//! HTTP handlers for `/pins`.

use crate::{
    dto::pin::{PinCreateRequest, PinUpdateRequest, PinView},
    errors::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST `/pins/create`
pub async fn create_pin(
    State(state): State<AppState>,
    Json(req): Json<PinCreateRequest>,
) -> Result<Json<PinView>, AppError> {
    let pin = state
        .pins
        .create(
            &req.title,
            &req.description,
            req.latitude,
            req.longitude,
            req.image_url.as_deref(),
            req.user_id,
        )
        .await?;
    Ok(Json(pin))
}

/// GET `/pins`
pub async fn list_pins(State(state): State<AppState>) -> Result<Json<Vec<PinView>>, AppError> {
    Ok(Json(state.pins.list_all().await?))
}

/// GET `/pins/{id}`
pub async fn get_pin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PinView>, AppError> {
    Ok(Json(state.pins.get_by_id(id).await?))
}

/// GET `/pins/user/{user_id}`
pub async fn list_user_pins(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PinView>>, AppError> {
    Ok(Json(state.pins.list_by_user(user_id).await?))
}

/// PUT `/pins/{id}`
pub async fn update_pin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PinUpdateRequest>,
) -> Result<Json<PinView>, AppError> {
    let pin = state
        .pins
        .update(id, &req.title, &req.description, req.image_url.as_deref())
        .await?;
    Ok(Json(pin))
}

/// DELETE `/pins/{id}`
pub async fn delete_pin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.pins.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
