//! In-process platform double for unit tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::client::{Platform, PlatformError, Result};
use super::types::{FeedPost, Identity};

/// Records comment calls and serves canned status/feed data.
#[derive(Default)]
pub struct FakePlatform {
    pub identity: Option<Identity>,
    pub posts: Option<Vec<FeedPost>>,
    pub accept_comments: bool,
    pub comments: Mutex<Vec<(String, String)>>,
}

impl FakePlatform {
    pub fn accepting() -> Self {
        Self {
            accept_comments: true,
            ..Self::default()
        }
    }

    pub fn with_identity(mut self, name: &str) -> Self {
        self.identity = Some(Identity::new(name));
        self
    }

    pub fn with_posts(mut self, posts: Vec<FeedPost>) -> Self {
        self.posts = Some(posts);
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn status(&self) -> Result<Identity> {
        self.identity.clone().ok_or(PlatformError::MissingIdentity)
    }

    async fn feed(&self) -> Result<Vec<FeedPost>> {
        self.posts.clone().ok_or_else(|| PlatformError::Exit {
            status: "exit status: 1".to_string(),
            diagnostic: "feed unavailable".to_string(),
        })
    }

    async fn comment(&self, post_id: &str, text: &str) -> Result<()> {
        self.comments
            .lock()
            .unwrap()
            .push((post_id.to_string(), text.to_string()));
        if self.accept_comments {
            Ok(())
        } else {
            Err(PlatformError::Rejected(r#"{"success": false}"#.to_string()))
        }
    }
}

pub fn post(id: &str, author: &str, title: &str, content: &str) -> FeedPost {
    FeedPost {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        author: super::types::Author {
            name: author.to_string(),
        },
        created_at: Some("2026-01-05T10:11:12.345Z".to_string()),
        comments: Vec::new(),
    }
}
