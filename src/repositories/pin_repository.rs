use crate::models::pin::{Pin, PinWithOwner};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

const PIN_WITH_OWNER_SELECT: &str = "SELECT p.id, p.title, p.description, p.latitude, p.longitude,
            p.image_url, p.user_id, p.created_at, u.username AS owner_username
     FROM pins p
     JOIN users u ON u.id = p.user_id";

/// Fields of a pin supplied at creation time.
#[derive(Debug, Clone)]
pub struct NewPin<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<&'a str>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PinRepository {
    db: Arc<SqlitePool>,
}

impl PinRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PinWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, PinWithOwner>(&format!("{PIN_WITH_OWNER_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&*self.db)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<PinWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, PinWithOwner>(&format!("{PIN_WITH_OWNER_SELECT} ORDER BY p.id ASC"))
            .fetch_all(&*self.db)
            .await
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<PinWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, PinWithOwner>(&format!(
            "{PIN_WITH_OWNER_SELECT} WHERE p.user_id = ? ORDER BY p.id ASC"
        ))
        .bind(user_id)
        .fetch_all(&*self.db)
        .await
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM pins WHERE id = ?)")
            .bind(id)
            .fetch_one(&*self.db)
            .await
    }

    pub async fn insert(&self, new_pin: NewPin<'_>) -> Result<Pin, sqlx::Error> {
        sqlx::query_as::<_, Pin>(
            "INSERT INTO pins (title, description, latitude, longitude, image_url, user_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id, title, description, latitude, longitude, image_url, user_id, created_at",
        )
        .bind(new_pin.title)
        .bind(new_pin.description)
        .bind(new_pin.latitude)
        .bind(new_pin.longitude)
        .bind(new_pin.image_url)
        .bind(new_pin.user_id)
        .bind(new_pin.created_at)
        .fetch_one(&*self.db)
        .await
    }

    /// Overwrite title and description. `image_url` replaces the stored value
    /// only when `Some`. Returns false if the id is unknown.
    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pins
             SET title = ?, description = ?, image_url = COALESCE(?, image_url)
             WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(image_url)
        .bind(id)
        .execute(&*self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete by id; comments on the pin cascade.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pins WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
