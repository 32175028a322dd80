//! moltmsg library root.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod platform;
pub mod registry;

pub use cli::Commands;
pub use config::{load_settings, Settings};
pub use core::{DispatchError, InboxKind, InboxMessage, Messenger, SentMessage};
pub use error::{Error, Result};
pub use platform::{FeedPost, Identity, Platform, PlatformError, ScriptPlatform};
pub use registry::{AgentRecord, FileRegistry, Registry, RegistrySource, StaticRegistry};
