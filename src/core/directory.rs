//! Agent listing with an optional capability filter.

use crate::registry::{AgentRecord, Registry};

/// Agents in registry order, keeping only those tagged with `capability` when given.
pub fn filter_agents(registry: &Registry, capability: Option<&str>) -> Vec<AgentRecord> {
    match capability.map(str::trim).filter(|c| !c.is_empty()) {
        Some(cap) => registry
            .agents
            .iter()
            .filter(|a| a.has_capability(cap))
            .cloned()
            .collect(),
        None => registry.agents.clone(),
    }
}
