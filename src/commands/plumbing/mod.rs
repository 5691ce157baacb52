//! Plumbing commands (low-level object operations)
//!
//! Plumbing commands give direct access to the object store. They're
//! primarily used for scripting and for inspecting what porcelain commands
//! wrote.
//!
//! ## Commands
//!
//! - `cat-file`: Print a stored object or its type
//! - `hash-object`: Compute object ID and optionally store in database

pub mod cat_file;
pub mod hash_object;
