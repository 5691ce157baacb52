//! Commit object
//!
//! Commits are snapshots of the whole index at a point in time. They contain:
//! - The tree: every staged path with its digest and text-safe content
//! - A parent, always `null`: every commit is a root commit
//! - Author, message and timestamp
//! - The digest of the tree alone, shared by commits of the same index
//!
//! ## Format
//!
//! On disk (pretty-printed JSON):
//! ```text
//! {
//!   "tree": { "<path>": { "hash": "<sha>", "content": "...", "binary": false } },
//!   "parent": null,
//!   "author": "<name>",
//!   "message": "<message>",
//!   "timestamp": "<rfc3339>",
//!   "tree_digest": "<sha>"
//! }
//! ```
//!
//! The commit ID is the SHA-1 of the compact, key-sorted serialization.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::content::EncodedContent;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Environment variable consulted for the author when the config has none
pub const AUTHOR_ENV: &str = "GITX_AUTHOR_NAME";

/// Author used when neither the config nor the environment names one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A committed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    #[serde(rename = "hash")]
    pub oid: ObjectId,
    #[serde(flatten)]
    pub content: EncodedContent,
}

impl From<&IndexEntry> for TreeEntry {
    fn from(entry: &IndexEntry) -> Self {
        TreeEntry {
            oid: entry.oid.clone(),
            content: entry.content.clone(),
        }
    }
}

/// Snapshot of the tree keyed by repository-relative path
pub type CommitTree = BTreeMap<String, TreeEntry>;

/// Commit object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    tree: CommitTree,
    parent: Option<ObjectId>,
    author: String,
    message: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    tree_digest: ObjectId,
}

impl Commit {
    /// Create a root commit stamped with the current time
    pub fn new(tree: CommitTree, author: String, message: String) -> anyhow::Result<Self> {
        Self::new_with_timestamp(tree, author, message, chrono::Local::now().fixed_offset())
    }

    pub fn new_with_timestamp(
        tree: CommitTree,
        author: String,
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<Self> {
        let tree_digest = Self::digest_tree(&tree)?;

        Ok(Commit {
            tree,
            parent: None,
            author,
            message,
            timestamp,
            tree_digest,
        })
    }

    /// Digest of the canonical serialization of a tree
    pub fn digest_tree(tree: &CommitTree) -> anyhow::Result<ObjectId> {
        let canonical = serde_json::to_vec(&serde_json::to_value(tree)?)?;
        Ok(ObjectId::from_content(&canonical))
    }

    /// Resolve the commit author
    ///
    /// The configured author wins, then `GITX_AUTHOR_NAME`, then "Unknown".
    pub fn resolve_author(configured: Option<&str>) -> String {
        configured
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .or_else(|| std::env::var(AUTHOR_ENV).ok())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree(&self) -> &CommitTree {
        &self.tree
    }

    pub fn tree_digest(&self) -> &ObjectId {
        &self.tree_digest
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content =
            serde_json::to_vec_pretty(self).context("Unable to serialize commit record")?;
        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("Invalid commit object")
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_digest));
        lines.push(format!("author {}", self.author));
        lines.push(format!("date {}", self.timestamp.to_rfc3339()));
        for (path, entry) in &self.tree {
            lines.push(format!("file {} {} {}", entry.oid, entry.content.kind(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }

    // keys are sorted because serde_json maps are ordered
    fn canonical(&self) -> anyhow::Result<Bytes> {
        let canonical = serde_json::to_vec(&serde_json::to_value(self)?)?;
        Ok(Bytes::from(canonical))
    }
}
