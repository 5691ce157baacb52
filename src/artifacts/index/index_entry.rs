//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - File path, repository-relative and `/`-separated
//! - Content hash (object ID) of the original bytes
//! - Modification time at staging
//! - Text-safe content, pending until commit writes the blob

use crate::artifacts::objects::content::EncodedContent;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// Index entry representing a staged file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// File path relative to repository root; the key of the index map
    #[serde(skip)]
    pub name: String,
    /// SHA-1 hash of the original file bytes
    #[serde(rename = "hash")]
    pub oid: ObjectId,
    /// Modification time in seconds since the Unix epoch
    #[serde(rename = "timestamp")]
    pub mtime: f64,
    #[serde(flatten)]
    pub content: EncodedContent,
}

impl IndexEntry {
    /// Build an entry from the bytes read from disk
    ///
    /// The digest is taken before encoding, so text and binary files
    /// hash the same way.
    pub fn from_bytes(name: String, bytes: Vec<u8>, mtime: f64) -> Self {
        let oid = ObjectId::from_content(&bytes);

        IndexEntry {
            name,
            oid,
            mtime,
            content: EncodedContent::from_bytes(bytes),
        }
    }

    pub fn is_binary(&self) -> bool {
        self.content.is_binary
    }

    /// Convert a relative path to the `/`-separated form used as index key
    pub fn key_from_path(path: &Path) -> String {
        path.components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Seconds since the epoch, with sub-second precision
    pub fn mtime_from(modified: SystemTime) -> f64 {
        modified
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|duration| duration.as_secs_f64())
            .unwrap_or_default()
    }
}
