//! Error types for moltmsg.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Platform error: {0}")]
    Platform(#[from] crate::platform::PlatformError),
}
