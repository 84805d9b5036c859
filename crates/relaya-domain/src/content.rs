//! Campaign and post content payloads.
//!
//! Stored as JSONB and decoded exactly once at the persistence boundary —
//! handlers and usecases only ever see these types, never raw JSON.

use serde::{Deserialize, Serialize};

/// Content of a bulk campaign message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    /// Pre-approved WhatsApp template send.
    Template {
        name: String,
        language: String,
        #[serde(default)]
        params: Vec<String>,
    },
    /// Free text. `subject` is used by the email channel and ignored by
    /// channels without a subject line.
    Text {
        subject: Option<String>,
        body: String,
    },
}

impl MessageContent {
    pub fn text(subject: Option<&str>, body: &str) -> Self {
        Self::Text {
            subject: subject.map(str::to_owned),
            body: body.to_owned(),
        }
    }
}

/// Content of a single social-media post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    pub caption: String,
    pub link: Option<String>,
    /// Publicly fetchable image URLs. Per-platform caps are applied by the
    /// adapter, not here.
    #[serde(default)]
    pub media: Vec<String>,
}
