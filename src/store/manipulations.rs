use crate::{errors::Result, models::ManipulationKind};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

// Page size of the listing endpoints
pub const PER_PAGE: u32 = 15;

const COLUMNS: &str = "id, kind, name, path, output_path, data, album_id, user_id, created_at";

// One row per performed manipulation. Immutable after creation; there is
// no update timestamp. `data` holds the original request parameters as
// opaque JSON text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ManipulationRecord {
    pub id: i64,
    pub kind: ManipulationKind,
    pub name: String,
    pub path: String,
    pub output_path: String,
    pub data: String,
    pub album_id: Option<i64>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewManipulation {
    pub kind: ManipulationKind,
    pub name: String,
    pub path: String,
    pub output_path: String,
    pub data: serde_json::Value,
    pub album_id: Option<i64>,
    pub user_id: i64,
}

// Ownership is the caller's concern: album ownership must be verified
// before calling, and none of these functions filter by requester.
pub async fn create(pool: &SqlitePool, new: NewManipulation) -> Result<ManipulationRecord> {
    let record = sqlx::query_as::<_, ManipulationRecord>(&format!(
        "INSERT INTO image_manipulations (kind, name, path, output_path, data, album_id, user_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING {COLUMNS}"
    ))
    .bind(new.kind)
    .bind(&new.name)
    .bind(&new.path)
    .bind(&new.output_path)
    .bind(new.data.to_string())
    .bind(new.album_id)
    .bind(new.user_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(record)
}

pub async fn list_by_user(
    pool: &SqlitePool,
    user_id: i64,
    page: u32,
) -> Result<(Vec<ManipulationRecord>, i64)> {
    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM image_manipulations WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    let records = sqlx::query_as::<_, ManipulationRecord>(&format!(
        "SELECT {COLUMNS} FROM image_manipulations WHERE user_id = ?1 \
         ORDER BY id LIMIT ?2 OFFSET ?3"
    ))
    .bind(user_id)
    .bind(i64::from(PER_PAGE))
    .bind(offset(page))
    .fetch_all(pool)
    .await?;

    Ok((records, total))
}

pub async fn list_by_album(
    pool: &SqlitePool,
    album_id: i64,
    page: u32,
) -> Result<(Vec<ManipulationRecord>, i64)> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM image_manipulations WHERE album_id = ?1",
    )
    .bind(album_id)
    .fetch_one(pool)
    .await?;
    let records = sqlx::query_as::<_, ManipulationRecord>(&format!(
        "SELECT {COLUMNS} FROM image_manipulations WHERE album_id = ?1 \
         ORDER BY id LIMIT ?2 OFFSET ?3"
    ))
    .bind(album_id)
    .bind(i64::from(PER_PAGE))
    .bind(offset(page))
    .fetch_all(pool)
    .await?;

    Ok((records, total))
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<ManipulationRecord>> {
    let record = sqlx::query_as::<_, ManipulationRecord>(&format!(
        "SELECT {COLUMNS} FROM image_manipulations WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

// Hard delete of the metadata row. Files under the record's directory are
// left on disk; the cleanup CLI sweeps directories no record points at.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM image_manipulations WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn total(pool: &SqlitePool) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM image_manipulations")
        .fetch_one(pool)
        .await?;

    Ok(total)
}

// True if any record stores a file under `images/<token>/`
pub async fn any_in_dir(pool: &SqlitePool, token: &str) -> Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS(SELECT 1 FROM image_manipulations WHERE path LIKE ?1)",
    )
    .bind(format!("images/{token}/%"))
    .fetch_one(pool)
    .await?;

    Ok(found != 0)
}

fn offset(page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{albums, users};
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::store::migrate(&pool).await.unwrap();

        pool
    }

    fn new_record(user_id: i64, album_id: Option<i64>, name: &str) -> NewManipulation {
        NewManipulation {
            kind: ManipulationKind::Resize,
            name: name.to_string(),
            path: format!("images/tok/{name}"),
            output_path: format!("images/tok/{name}-resized.png"),
            data: json!({"w": "50%"}),
            album_id,
            user_id,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let pool = test_pool().await;
        let user = users::create(&pool, "ana").await.unwrap();

        let record = create(&pool, new_record(user.id, None, "a.png"))
            .await
            .unwrap();

        assert!(record.id > 0);
        assert_eq!(record.kind, ManipulationKind::Resize);
        assert_eq!(record.path, "images/tok/a.png");
        assert_eq!(record.data, json!({"w": "50%"}).to_string());
        assert_eq!(record.album_id, None);

        let fetched = find(&pool, record.id).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, user.id);
        assert_eq!(fetched.created_at, record.created_at);
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_user_in_creation_order() {
        let pool = test_pool().await;
        let ana = users::create(&pool, "ana").await.unwrap();
        let bob = users::create(&pool, "bob").await.unwrap();

        for name in ["1.png", "2.png", "3.png"] {
            create(&pool, new_record(ana.id, None, name)).await.unwrap();
        }
        create(&pool, new_record(bob.id, None, "x.png"))
            .await
            .unwrap();

        let (records, total) = list_by_user(&pool, ana.id, 1).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["1.png", "2.png", "3.png"]);
        assert!(records.iter().all(|r| r.user_id == ana.id));
    }

    #[tokio::test]
    async fn listing_paginates_at_fifteen() {
        let pool = test_pool().await;
        let user = users::create(&pool, "ana").await.unwrap();

        for i in 0..17 {
            create(&pool, new_record(user.id, None, &format!("{i}.png")))
                .await
                .unwrap();
        }

        let (first, total) = list_by_user(&pool, user.id, 1).await.unwrap();
        let (second, _) = list_by_user(&pool, user.id, 2).await.unwrap();
        let (third, _) = list_by_user(&pool, user.id, 3).await.unwrap();
        assert_eq!(total, 17);
        assert_eq!(first.len(), 15);
        assert_eq!(second.len(), 2);
        assert!(third.is_empty());
        assert_eq!(second[0].name, "15.png");
    }

    #[tokio::test]
    async fn listing_by_album_ignores_records_outside_it() {
        let pool = test_pool().await;
        let user = users::create(&pool, "ana").await.unwrap();
        let album = albums::create(&pool, "trip", user.id).await.unwrap();

        create(&pool, new_record(user.id, Some(album.id), "in.png"))
            .await
            .unwrap();
        create(&pool, new_record(user.id, None, "out.png"))
            .await
            .unwrap();

        let (records, total) = list_by_album(&pool, album.id, 1).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(records[0].name, "in.png");
        assert_eq!(records[0].album_id, Some(album.id));
    }

    #[tokio::test]
    async fn delete_removes_only_the_row() {
        let pool = test_pool().await;
        let user = users::create(&pool, "ana").await.unwrap();
        let record = create(&pool, new_record(user.id, None, "a.png"))
            .await
            .unwrap();

        assert!(delete(&pool, record.id).await.unwrap());
        assert!(find(&pool, record.id).await.unwrap().is_none());
        // Second delete is a no-op
        assert!(!delete(&pool, record.id).await.unwrap());
    }

    #[tokio::test]
    async fn any_in_dir_matches_the_token_prefix() {
        let pool = test_pool().await;
        let user = users::create(&pool, "ana").await.unwrap();
        create(&pool, new_record(user.id, None, "a.png"))
            .await
            .unwrap();

        assert!(any_in_dir(&pool, "tok").await.unwrap());
        assert!(!any_in_dir(&pool, "other").await.unwrap());
    }
}
