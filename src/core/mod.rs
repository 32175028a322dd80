//! Core module - addressing, dispatch, and inbox scanning.
//!
//! This module contains the messaging protocol itself:
//! - Recipient resolution against the registry
//! - Mention framing and comment dispatch
//! - Inbox classification of the feed
//! - Agent listing

pub mod directory;
pub mod dispatch;
pub mod inbox;
pub mod resolver;

pub use dispatch::{frame_message, DispatchError, SentMessage};
pub use inbox::{InboxKind, InboxMessage};
pub use resolver::IdentityResolver;

use std::sync::Arc;

use crate::error::Result;
use crate::platform::{Identity, Platform};
use crate::registry::{AgentRecord, RegistrySource};

/// Entry point tying the registry and the platform together.
///
/// Holds no mutable state. The caller's identity is passed in where it is
/// needed rather than cached here.
#[derive(Clone)]
pub struct Messenger {
    resolver: IdentityResolver,
    platform: Arc<dyn Platform>,
}

impl Messenger {
    pub fn new(registry: Arc<dyn RegistrySource>, platform: Arc<dyn Platform>) -> Self {
        Self {
            resolver: IdentityResolver::new(registry),
            platform,
        }
    }

    /// Ask the platform who we are.
    pub async fn whoami(&self) -> Result<Identity> {
        Ok(self.platform.status().await?)
    }

    pub fn resolve(&self, token: &str) -> Result<Option<AgentRecord>> {
        self.resolver.resolve(token)
    }

    pub async fn send(&self, recipient: &str, body: &str) -> std::result::Result<SentMessage, DispatchError> {
        dispatch::send(&self.resolver, self.platform.as_ref(), recipient, body).await
    }

    pub async fn check_inbox(&self, me: &Identity, limit: usize) -> Vec<InboxMessage> {
        inbox::check_inbox(self.platform.as_ref(), me, limit).await
    }

    pub fn list_agents(&self, capability: Option<&str>) -> Result<Vec<AgentRecord>> {
        let registry = self.resolver.snapshot()?;
        Ok(directory::filter_agents(&registry, capability))
    }
}
