//! Platform trait for moltmsg.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{FeedPost, Identity};

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Failed to run platform command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Platform command exited with {status}: {diagnostic}")]
    Exit { status: String, diagnostic: String },

    #[error("Unexpected platform response: {0}")]
    Parse(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Platform command timed out after {0}s")]
    Timeout(u64),

    #[error("Platform status did not report an agent name")]
    MissingIdentity,
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Capabilities the messenger needs from the feed platform.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Identity of the agent this process acts as.
    async fn status(&self) -> Result<Identity>;

    /// Current feed window, in platform order.
    async fn feed(&self) -> Result<Vec<FeedPost>>;

    /// Attach a comment to an existing post.
    async fn comment(&self, post_id: &str, text: &str) -> Result<()>;
}
