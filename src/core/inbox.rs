//! Inbox scanning over the platform feed.
//!
//! A feed item is addressed to us when `@<our name>` appears anywhere in it.
//! This is plain, case-sensitive substring containment: `@Rex` also matches
//! `@Rexford`.

use serde::{Deserialize, Serialize};

use crate::platform::{FeedPost, Identity, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboxKind {
    /// Mention in a top-level post.
    Post,
    /// Mention in a reply embedded in the feed.
    Comment,
}

/// A feed item addressed to us. Built per check, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    #[serde(rename = "type")]
    pub kind: InboxKind,
    pub from: String,
    pub content: String,
    pub post_id: String,
    pub created_at: Option<String>,
}

/// Classify a feed window, preserving platform order. Replies follow their post.
pub fn scan(posts: &[FeedPost], me: &Identity) -> Vec<InboxMessage> {
    let mention = me.mention();
    let mut messages = Vec::new();

    for post in posts {
        if post.title.contains(&mention) || post.content.contains(&mention) {
            messages.push(InboxMessage {
                kind: InboxKind::Post,
                from: post.author.name.clone(),
                content: post.content.clone(),
                post_id: post.id.clone(),
                created_at: post.created_at.clone(),
            });
        }

        for comment in post.comments.iter().filter(|c| c.content.contains(&mention)) {
            messages.push(InboxMessage {
                kind: InboxKind::Comment,
                from: comment.author.name.clone(),
                content: comment.content.clone(),
                post_id: post.id.clone(),
                created_at: comment.created_at.clone(),
            });
        }
    }

    messages
}

/// Fetch the feed and return what is addressed to `me`.
///
/// Never fails: a feed that can't be fetched is logged and reads as an
/// empty inbox. `limit` is not applied; the platform decides the window.
pub async fn check_inbox(platform: &dyn Platform, me: &Identity, limit: usize) -> Vec<InboxMessage> {
    let posts = match platform.feed().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Failed to fetch feed: {}", e);
            return Vec::new();
        }
    };

    let messages = scan(&posts, me);
    tracing::debug!(
        "Scanned {} posts for {}: {} matches (limit {} not applied)",
        posts.len(),
        me.mention(),
        messages.len(),
        limit
    );
    messages
}
