//! Structured views of the platform's JSON responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The agent this process acts as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Mention token other agents use to address us.
    pub fn mention(&self) -> String {
        format!("@{}", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// A top-level post in the feed window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_author")]
    pub author: Author,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub created_at: Option<String>,
    /// Replies, when the feed payload embeds them.
    #[serde(default, deserialize_with = "lenient_comments")]
    pub comments: Vec<FeedComment>,
}

/// A reply embedded in a feed post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedComment {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_author")]
    pub author: Author,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub created_at: Option<String>,
}

/// `status` response.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub agent: Option<Author>,
}

/// `feed` response.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedResponse {
    #[serde(default)]
    pub posts: Vec<FeedPost>,
}

/// `comment` response. Only `success` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    #[serde(default)]
    pub success: Value,
}

impl CommentResponse {
    pub fn succeeded(&self) -> bool {
        is_truthy(&self.success)
    }
}

/// JSON truthiness: false, null, zero and empty values are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_author<'de, D>(deserializer: D) -> std::result::Result<Author, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_comments<'de, D>(deserializer: D) -> std::result::Result<Vec<FeedComment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
