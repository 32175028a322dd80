//! Recipient resolution against the agent registry.
//!
//! Matching order, first hit wins:
//! - exact name, ignoring case
//! - id prefix of the lower-cased token (short ids)
//! - exact id
//!
//! Each rule is tried across the whole registry before the next one, so a
//! name always beats an id prefix. Within a rule the first record in file
//! order wins; duplicate names are not disambiguated further.

use std::sync::Arc;

use crate::error::Result;
use crate::registry::{AgentRecord, Registry, RegistrySource};

/// Find the record a recipient token refers to.
pub fn find_agent<'a>(registry: &'a Registry, token: &str) -> Option<&'a AgentRecord> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let lowered = token.to_lowercase();

    registry
        .agents
        .iter()
        .find(|a| a.name.to_lowercase() == lowered)
        .or_else(|| registry.agents.iter().find(|a| a.id.starts_with(&lowered)))
        .or_else(|| registry.agents.iter().find(|a| a.id == token))
}

/// Resolves tokens against a fresh registry snapshot on every call.
#[derive(Clone)]
pub struct IdentityResolver {
    source: Arc<dyn RegistrySource>,
}

impl IdentityResolver {
    pub fn new(source: Arc<dyn RegistrySource>) -> Self {
        Self { source }
    }

    /// Current registry snapshot.
    pub fn snapshot(&self) -> Result<Registry> {
        self.source.load()
    }

    /// Resolve a token. A registry that can't be read is an error; no match is `None`.
    pub fn resolve(&self, token: &str) -> Result<Option<AgentRecord>> {
        let registry = self.snapshot()?;
        let found = find_agent(&registry, token).cloned();

        match &found {
            Some(agent) => tracing::debug!("Resolved '{}' to {} ({})", token, agent.name, agent.id),
            None => tracing::debug!("No agent matches '{}'", token),
        }

        Ok(found)
    }
}
