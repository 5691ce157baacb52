//! Core utilities and shared types
//!
//! This module contains the error kinds shared across the object store,
//! the commit engine and the sync engine. Operations return `anyhow::Result`;
//! callers that need to branch on a failure recover the kind with
//! `err.downcast_ref::<GitxError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures with a meaning callers can act upon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitxError {
    /// The object store has no object with this digest.
    #[error("object {0} not found")]
    NotFound(ObjectId),

    /// The directory has no `.gitx` metadata directory.
    #[error("not a gitx repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// No remote with this name in the configuration.
    #[error("remote {0} not found")]
    RemoteNotFound(String),

    /// The remote URL is not a supported hosting URL.
    #[error("unsupported remote {0}: only https://github.com/<owner>/<repo> remotes are supported")]
    UnsupportedRemote(String),

    /// The current branch has no ref file yet.
    #[error("no commits to push")]
    NothingToPush,

    /// The branch ref names a commit that is not in the object store.
    #[error("commit {0} not found")]
    CommitNotFound(ObjectId),

    /// No access token has been stored.
    #[error("access token not set, use: gitx auth <token>")]
    Unauthenticated,

    /// The commit to publish has no files.
    #[error("no files to push")]
    EmptyTree,

    /// A hosting API call failed or answered with a non-2xx status.
    #[error("remote request failed: {detail}")]
    RemoteRequestFailed {
        /// HTTP status, absent when the request never got an answer
        status: Option<u16>,
        detail: String,
    },

    /// A per-file contents write failed during fallback publish.
    #[error("failed to write {path}: {detail}")]
    PerFileWriteFailed { path: String, detail: String },
}

impl GitxError {
    pub fn remote_request_failed(status: Option<u16>, detail: impl Into<String>) -> Self {
        GitxError::RemoteRequestFailed {
            status,
            detail: detail.into(),
        }
    }
}
