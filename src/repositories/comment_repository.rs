use crate::models::comment::{Comment, CommentWithAuthor};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<SqlitePool>,
}

impl CommentRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        text: &str,
        user_id: i64,
        pin_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (text, user_id, pin_id, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, text, user_id, pin_id, created_at",
        )
        .bind(text)
        .bind(user_id)
        .bind(pin_id)
        .bind(created_at)
        .fetch_one(&*self.db)
        .await
    }

    /// Comments on a pin, newest first. Equal timestamps fall back to
    /// insertion order, also newest first.
    pub async fn find_by_pin_id_newest_first(
        &self,
        pin_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.text, c.user_id, c.pin_id, c.created_at,
                    u.username AS author_username
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.pin_id = ?
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(pin_id)
        .fetch_all(&*self.db)
        .await
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comments WHERE id = ?)")
            .bind(id)
            .fetch_one(&*self.db)
            .await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
