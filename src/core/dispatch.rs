//! Outbound messages: resolve, frame, and post as a comment on the
//! recipient's mailbox post.

use thiserror::Error;

use super::resolver::IdentityResolver;
use crate::error::Error;
use crate::platform::{Platform, PlatformError};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Agent not found: {token}")]
    AgentNotFound { token: String, known: Vec<String> },

    #[error("No post found for {name} - can't message")]
    NoMailbox { name: String },

    #[error("Failed to send: {0}")]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Registry(#[from] Error),
}

/// A comment the platform accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub recipient: String,
    pub post_id: String,
    pub text: String,
}

/// Wire form of an addressed message. The mention is the only addressing there is.
pub fn frame_message(recipient_name: &str, body: &str) -> String {
    format!("@{} {}", recipient_name, body)
}

/// Send `body` to the agent `token` resolves to. One attempt, no retries.
pub async fn send(
    resolver: &IdentityResolver,
    platform: &dyn Platform,
    token: &str,
    body: &str,
) -> Result<SentMessage, DispatchError> {
    let registry = resolver.snapshot()?;
    let Some(agent) = super::resolver::find_agent(&registry, token) else {
        tracing::warn!("Cannot send to '{}': no such agent", token);
        return Err(DispatchError::AgentNotFound {
            token: token.to_string(),
            known: registry.known_names(),
        });
    };

    let post_id = match agent.post_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            tracing::warn!("Cannot send to {}: no mailbox post", agent.name);
            return Err(DispatchError::NoMailbox {
                name: agent.name.clone(),
            });
        }
    };

    let text = frame_message(&agent.name, body);
    platform.comment(&post_id, &text).await.map_err(|e| {
        tracing::warn!("Comment on {} for {} failed: {}", post_id, agent.name, e);
        e
    })?;

    tracing::info!("Sent message to {} on post {}", agent.name, post_id);
    Ok(SentMessage {
        recipient: agent.name.clone(),
        post_id,
        text,
    })
}
