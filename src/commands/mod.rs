//! Command implementations
//!
//! This module contains all command implementations, organized into two
//! categories following Git's architecture:
//!
//! - `plumbing`: Low-level commands for direct object manipulation (cat-file, hash-object)
//! - `porcelain`: User-facing commands for version control workflows (add, commit, push, etc.)
//!
//! Every command is an `impl Repository` block writing its output to the
//! repository's writer.

pub mod plumbing;
pub mod porcelain;
