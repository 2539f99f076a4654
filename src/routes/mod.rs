pub mod manipulations;
pub mod server;

use log::info;

pub async fn healthcheck() -> String {
    info!("Health check endpoint hit");

    "ok".to_string()
}
