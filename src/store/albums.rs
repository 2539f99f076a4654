use crate::errors::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Album>> {
    let album =
        sqlx::query_as::<_, Album>("SELECT id, name, user_id, created_at FROM albums WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(album)
}

pub async fn create(pool: &SqlitePool, name: &str, user_id: i64) -> Result<Album> {
    let album = sqlx::query_as::<_, Album>(
        "INSERT INTO albums (name, user_id, created_at) VALUES (?1, ?2, ?3) \
         RETURNING id, name, user_id, created_at",
    )
    .bind(name)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(album)
}
