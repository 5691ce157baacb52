//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch and symbolic ref names
//! - `core`: Shared error kinds
//! - `ignore`: Glob translation and ignore rules
//! - `index`: Index/staging area data structures
//! - `objects`: Object types (blob, commit) and content encoding
//! - `remote`: Remote URLs, hosting API and two-phase publish

pub mod branch;
pub mod core;
pub mod ignore;
pub mod index;
pub mod objects;
pub mod remote;
