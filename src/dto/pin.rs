use crate::models::pin::PinWithOwner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /pins/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinCreateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub user_id: i64,
}

/// Body of `PUT /pins/{id}`. A missing or empty `imageUrl` keeps the stored one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinUpdateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

/// Pin view with the owner's username denormalized in.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PinView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<PinWithOwner> for PinView {
    fn from(row: PinWithOwner) -> Self {
        let pin = row.pin;
        Self {
            id: pin.id,
            title: pin.title,
            description: pin.description,
            latitude: pin.latitude,
            longitude: pin.longitude,
            image_url: pin.image_url,
            user_id: pin.user_id,
            username: row.owner_username,
            created_at: pin.created_at,
        }
    }
}
