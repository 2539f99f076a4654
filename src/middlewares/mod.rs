mod auth;

pub use auth::{CurrentUser, auth};
