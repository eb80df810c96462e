// crates/choromap-core/src/error.rs
use thiserror::Error;

/// Every failure the loader, topology decoder and scales can report.
#[derive(Debug, Error)]
pub enum MapError {
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("topology has no object named `{0}`")]
    MissingObject(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("invalid color scale: {0}")]
    InvalidScale(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
