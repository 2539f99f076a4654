use crate::{err, errors::Error};

pub mod api;
pub mod params;
pub mod payload;

// Operation kinds. Only resizing exists today; new manipulations
// (crop, rotate, ...) get their own variant and handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ManipulationKind {
    Resize,
}

impl std::str::FromStr for ManipulationKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resize" => Ok(ManipulationKind::Resize),
            _ => err!("unknown manipulation kind: {s}"),
        }
    }
}

impl std::fmt::Display for ManipulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManipulationKind::Resize => write!(f, "resize"),
        }
    }
}
