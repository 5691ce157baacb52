//! Core repository components
//!
//! This module contains the on-disk areas of a repository:
//!
//! - `config`: Remote configuration (author, named remotes) and the auth record
//! - `database`: Object database for storing blobs and commits
//! - `index`: Staging area for tracking file snapshots
//! - `refs`: Reference management (HEAD, branches)
//! - `repository`: High-level repository handle and coordination
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
