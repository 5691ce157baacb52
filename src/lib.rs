//! gitx: a minimal local version-control tool
//!
//! Files are staged into a JSON index, committed as root commits into a
//! content-addressed object store, and published to a GitHub-style hosting
//! API with a batch publish and a per-file fallback.
//!
//! - `areas`: on-disk components (object database, index, refs, config, workspace)
//! - `artifacts`: data structures and algorithms (objects, ignore rules, remote sync)
//! - `commands`: user-facing operations implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
