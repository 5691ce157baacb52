//! Text-safe file content
//!
//! Staged and committed content is carried inside JSON records, so bytes that
//! are not valid UTF-8 are base64-encoded and flagged as binary. Text is kept
//! verbatim. The encoding is reversible: `to_bytes` always yields the
//! original bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedContent {
    pub content: String,
    #[serde(rename = "binary", default)]
    pub is_binary: bool,
}

impl EncodedContent {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(content) => EncodedContent {
                content,
                is_binary: false,
            },
            Err(err) => EncodedContent {
                content: STANDARD.encode(err.as_bytes()),
                is_binary: true,
            },
        }
    }

    /// Original bytes
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        if self.is_binary {
            Ok(STANDARD.decode(&self.content)?)
        } else {
            Ok(self.content.as_bytes().to_vec())
        }
    }

    /// Base64 of the original bytes, as hosting APIs expect it
    ///
    /// Binary content is already in that form and is reused as-is.
    pub fn to_base64(&self) -> String {
        if self.is_binary {
            self.content.clone()
        } else {
            STANDARD.encode(self.content.as_bytes())
        }
    }

    pub fn kind(&self) -> &'static str {
        if self.is_binary { "binary" } else { "text" }
    }
}
