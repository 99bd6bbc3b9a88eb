//! Transport envelope.
//!
//! A [`Message`] is the unit exchanged with the pub/sub layer: a channel
//! (topic) and an opaque payload. Payloads are kept as raw bytes because one
//! message kind (file binary response) carries a binary frame; every other
//! kind is UTF-8 text.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Payload bytes are stored as base64 when an envelope is persisted.
mod content_serde {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// A channel plus payload, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    #[serde(with = "content_serde")]
    content: Vec<u8>,
    channel: String,
}

impl Message {
    /// Create a new envelope.
    pub fn new(content: impl Into<Vec<u8>>, channel: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            channel: channel.into(),
        }
    }

    /// Raw payload bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Payload as text, replacing invalid UTF-8 sequences.
    pub fn content_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// The topic this envelope travels on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Split into `(content, channel)`.
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.content, self.channel)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.channel, self.content_str())
    }
}
