pub type Result<T> = std::result::Result<T, Error>;

// Error code ranges:
//  - 100-200: request parameter errors
//  - 400-500: resource errors
//  - internal errors carry no code (mapped to HTTP 500)
// HTTP status codes in use:
//  - 401: not authenticated
//  - 403: not the owner
//  - 404: resource not found
//  - 422: invalid input

#[derive(Debug, thiserror::Error, strum_macros::EnumProperty)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Error {
    // Required multipart field is absent
    #[strum(props(status_code = 422, code = 101))]
    #[error("missing required field: {0}")]
    MissingField(String),
    // Field present but unusable
    #[strum(props(status_code = 422, code = 102))]
    #[error("invalid value for field `{field}`: {value}")]
    InvalidField { field: String, value: String },
    // Uploaded file name is empty or escapes the target directory
    #[strum(props(status_code = 422, code = 103))]
    #[error("illegal file name: {0}")]
    IllegalFileName(String),
    // Sizing parameter failed to parse or is non-positive
    #[strum(props(status_code = 422, code = 110))]
    #[error("invalid size parameter `{field}`: {value}")]
    InvalidSizeParam { field: String, value: String },
    // Source image has a degenerate size
    #[strum(props(status_code = 422, code = 111))]
    #[error("image has zero width or height")]
    DegenerateImage,
    #[strum(props(status_code = 404, code = 410))]
    #[error("album not found: {0}")]
    AlbumNotFound(i64),
    #[strum(props(status_code = 404, code = 411))]
    #[error("image manipulation not found: {0}")]
    RecordNotFound(i64),
    #[strum(props(status_code = 401))]
    #[error("authentication required")]
    Unauthenticated,
    #[strum(props(status_code = 403))]
    #[error("unauthorized access")]
    Unauthorized,
    // Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
    #[error("task join error: {0}")]
    TokioTaskJoin(#[from] tokio::task::JoinError),
    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[macro_export]
macro_rules! fail {
    ($msg:expr) => {
        $crate::errors::Error::Internal(format!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::errors::Error::Internal(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! err {
    ($msg:expr) => {
        Err($crate::fail!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::fail!($fmt, $($arg)*))
    };
}
