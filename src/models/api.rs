use crate::errors::Error;
use axum::{http::StatusCode, response::IntoResponse};
use log::error;
use serde::Serialize;
use strum::EnumProperty;

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: Option<i64>) -> Self {
        ApiError {
            message: message.into(),
            code,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let code = self.get_int("code");
        match self.get_int("status_code") {
            Some(status_code) => {
                let status_code = match StatusCode::from_u16(status_code as u16) {
                    Ok(status_code) => status_code,
                    Err(_e) => {
                        // This may be a bug: an error variant declares an invalid status code
                        error!(
                            "This may be a bug: an error variant declares an invalid status code: {status_code}"
                        );

                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };

                (
                    status_code,
                    axum::Json(ApiError::new(self.to_string(), code)),
                )
                    .into_response()
            }
            None => {
                // No status code means an internal failure
                error!("request failed: {self}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(ApiError::new(self.to_string(), code)),
                )
                    .into_response()
            }
        }
    }
}
