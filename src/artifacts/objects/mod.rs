//! Object types stored in the object database
//!
//! Every stored object is addressed by the SHA-1 digest of its content:
//!
//! - **Blob**: file content, stored as the original bytes
//! - **Commit**: a JSON snapshot record of the staged tree with metadata
//!
//! Blobs are hashed over their raw bytes. Commits are hashed over their
//! canonical serialization (compact JSON with sorted keys) and stored
//! pretty-printed so they stay readable on disk.

pub mod blob;
pub mod commit;
pub mod content;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
