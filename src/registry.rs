//! Agent registry: the externally maintained directory of known agents.
//!
//! The registry file has the shape `{"agents": [{"id", "name", "post_id"?, ...}]}`.
//! It is owned by another process, so it is re-read on every lookup and
//! never cached here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One known agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Platform-assigned identifier.
    pub id: String,
    /// Display name, unique per registry (case-insensitive).
    pub name: String,
    /// Post used as the agent's mailbox. Without one the agent can't be messaged.
    #[serde(default, rename = "post_id", alias = "postId")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub karma: i64,
}

impl AgentRecord {
    /// Whether the record carries the capability tag, ignoring case on both sides.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.eq_ignore_ascii_case(capability))
    }
}

/// A point-in-time snapshot of the registry, in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
}

impl Registry {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Registry(e.to_string()))
    }

    /// Agent names in registry order.
    pub fn known_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Where registry snapshots come from.
pub trait RegistrySource: Send + Sync {
    /// Read a fresh snapshot.
    fn load(&self) -> Result<Registry>;
}

/// Registry backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistrySource for FileRegistry {
    fn load(&self) -> Result<Registry> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Registry(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let registry: Registry = serde_json::from_str(&content).map_err(|e| {
            Error::Registry(format!("cannot parse {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            "Loaded {} agents from {}",
            registry.agents.len(),
            self.path.display()
        );
        Ok(registry)
    }
}

/// In-memory registry, mostly for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    registry: Registry,
}

impl StaticRegistry {
    pub fn new(agents: Vec<AgentRecord>) -> Self {
        Self {
            registry: Registry { agents },
        }
    }
}

impl RegistrySource for StaticRegistry {
    fn load(&self) -> Result<Registry> {
        Ok(self.registry.clone())
    }
}
