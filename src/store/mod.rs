use crate::{errors::Result, fail, vars::RESIZD_DATABASE_URL};
use log::info;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::sync::OnceLock;

pub mod albums;
pub mod manipulations;
pub mod users;

static POOL: OnceLock<SqlitePool> = OnceLock::new();

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    token       TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS albums (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    user_id     INTEGER NOT NULL REFERENCES users (id),
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS image_manipulations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    kind        TEXT NOT NULL,
    name        TEXT NOT NULL,
    path        TEXT NOT NULL,
    output_path TEXT NOT NULL,
    data        TEXT NOT NULL,
    album_id    INTEGER REFERENCES albums (id),
    user_id     INTEGER NOT NULL REFERENCES users (id),
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_image_manipulations_user ON image_manipulations (user_id);
CREATE INDEX IF NOT EXISTS idx_image_manipulations_album ON image_manipulations (album_id);
"#;

pub async fn init() -> Result<()> {
    let pool = SqlitePoolOptions::new()
        .connect(*RESIZD_DATABASE_URL)
        .await?;
    migrate(&pool).await?;
    POOL.set(pool)
        .map_err(|_| fail!("the database pool is already initialized"))?;
    info!("Database ready at {}", *RESIZD_DATABASE_URL);

    Ok(())
}

pub fn pool() -> &'static SqlitePool {
    POOL.get()
        .expect("The database pool is not initialized, call store::init() first")
}

// Idempotent, applied on every startup
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;

    Ok(())
}
