use crate::{models::ManipulationKind, store::manipulations::ManipulationRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

// External representation of a stored manipulation record.
#[derive(Debug, Clone, Serialize)]
pub struct ManipulationPayload {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ManipulationKind,
    pub name: String,
    pub path: String,
    pub output_path: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<i64>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ManipulationRecord> for ManipulationPayload {
    fn from(record: ManipulationRecord) -> Self {
        // `data` is stored as opaque JSON text; anything unreadable
        // surfaces as null rather than failing the whole response
        let data = serde_json::from_str(&record.data).unwrap_or(Value::Null);

        ManipulationPayload {
            id: record.id,
            kind: record.kind,
            name: record.name,
            path: record.path,
            output_path: record.output_path,
            data,
            album_id: record.album_id,
            user_id: record.user_id,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub version: String,
    pub started_at: Option<DateTime<Utc>>,
    pub total_manipulations: i64,
}
