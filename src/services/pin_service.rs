//! PinService — create, browse, edit, and remove pins.

use crate::{
    dto::pin::PinView,
    models::pin::{DESCRIPTION_MAX_LEN, IMAGE_URL_MAX_LEN},
    repositories::{
        pin_repository::{NewPin, PinRepository},
        user_repository::UserRepository,
    },
    services::{ServiceError, ServiceResult, ensure_len},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct PinService {
    pins: PinRepository,
    users: UserRepository,
}

impl PinService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            pins: PinRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Create a pin owned by `user_id`. Nothing is written if the user does
    /// not exist.
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        latitude: f64,
        longitude: f64,
        image_url: Option<&str>,
        user_id: i64,
    ) -> ServiceResult<PinView> {
        validate(description, image_url)?;

        let owner = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        let pin = self
            .pins
            .insert(NewPin {
                title,
                description,
                latitude,
                longitude,
                image_url,
                user_id,
                created_at: Utc::now(),
            })
            .await?;

        info!(pin_id = pin.id, user_id, "created pin {:?}", pin.title);
        Ok(PinView {
            id: pin.id,
            title: pin.title,
            description: pin.description,
            latitude: pin.latitude,
            longitude: pin.longitude,
            image_url: pin.image_url,
            user_id: pin.user_id,
            username: owner.username,
            created_at: pin.created_at,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<PinView> {
        self.pins
            .find_by_id(id)
            .await?
            .map(PinView::from)
            .ok_or_else(|| ServiceError::not_found("Pin", id))
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<PinView>> {
        Ok(self
            .pins
            .find_all()
            .await?
            .into_iter()
            .map(PinView::from)
            .collect())
    }

    /// Pins owned by `user_id`. An existing user with no pins yields an
    /// empty list; only an unknown user is `NotFound`.
    pub async fn list_by_user(&self, user_id: i64) -> ServiceResult<Vec<PinView>> {
        if !self.users.exists_by_id(user_id).await? {
            return Err(ServiceError::not_found("User", user_id));
        }
        Ok(self
            .pins
            .find_by_user_id(user_id)
            .await?
            .into_iter()
            .map(PinView::from)
            .collect())
    }

    /// Overwrite title and description. `image_url` is applied only when it
    /// is present and non-empty.
    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> ServiceResult<PinView> {
        let image_url = image_url.filter(|url| !url.is_empty());
        validate(description, image_url)?;

        if !self.pins.update(id, title, description, image_url).await? {
            return Err(ServiceError::not_found("Pin", id));
        }
        debug!(pin_id = id, "updated pin");
        self.get_by_id(id).await
    }

    /// Delete by id. Deleting an unknown id is not an error; comments on the
    /// pin are removed with it.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let removed = self.pins.delete_by_id(id).await?;
        debug!(pin_id = id, removed, "delete pin");
        Ok(())
    }
}

fn validate(description: &str, image_url: Option<&str>) -> ServiceResult<()> {
    ensure_len("description", description, DESCRIPTION_MAX_LEN, false)?;
    if let Some(url) = image_url {
        ensure_len("imageUrl", url, IMAGE_URL_MAX_LEN, false)?;
    }
    Ok(())
}
