//! Remote synchronization
//!
//! Publishing a commit to a hosting API happens in two phases:
//!
//! 1. **Fast publish**: one tree with every file, one parentless commit on
//!    top of it, then the branch ref. All or nothing; the calls are strictly
//!    ordered because each needs the previous call's digest.
//! 2. **Fallback publish**: when the fast path is rejected with a conflict
//!    or because the remote repository is empty, every file is written on
//!    its own through the contents API. Failures are collected per file and
//!    do not stop the remaining writes.
//!
//! - `remote_url`: hosting URL parsing
//! - `tree_entry`: remote tree entries built from a commit
//! - `hosting_api`: the transport seam
//! - `github`: `reqwest` implementation of the seam
//! - `publish`: the two-phase publisher

pub mod github;
pub mod hosting_api;
pub mod publish;
pub mod remote_url;
pub mod tree_entry;
