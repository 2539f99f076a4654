use crate::errors::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, token, created_at FROM users WHERE token = ?1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn create(pool: &SqlitePool, name: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, token, created_at) VALUES (?1, ?2, ?3) \
         RETURNING id, name, token, created_at",
    )
    .bind(name)
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}
