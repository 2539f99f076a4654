use crate::{errors::Result, models::payload::ServerInfo, store, vars::STARTED_AT};
use axum::Json;

pub async fn info() -> Result<Json<ServerInfo>> {
    Ok(Json(ServerInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: STARTED_AT.get().cloned(),
        total_manipulations: store::manipulations::total(store::pool()).await?,
    }))
}
