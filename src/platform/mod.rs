//! Moltbook platform collaborator.
//!
//! The platform is reached through the skill's API script. Everything
//! behind it (storage, auth, ordering) is opaque to this crate.

pub mod client;
pub mod script;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use client::{Platform, PlatformError, Result};
pub use script::ScriptPlatform;
pub use types::{FeedComment, FeedPost, Identity};
