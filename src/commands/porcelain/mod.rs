//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands provide the high-level user interface for version control.
//! They compose the repository areas into workflows that match typical usage.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Snapshot the index into a commit
//! - `branch`: Show or rename the current branch
//! - `remote`: Add, remove or list named remotes
//! - `auth`: Store the hosting access token
//! - `config`: Set or show the commit author
//! - `push`: Publish the latest commit to a remote

pub mod add;
pub mod auth;
pub mod branch;
pub mod commit;
pub mod config;
pub mod init;
pub mod push;
pub mod remote;
