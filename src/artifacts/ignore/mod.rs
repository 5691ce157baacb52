//! Ignore rules and glob matching
//!
//! Paths are matched as `/`-separated, repository-relative strings.
//!
//! ## Glob syntax
//!
//! - `*` matches any run of characters except `/`
//! - `**` matches any run of characters including `/`; `**/` may match nothing
//! - `?` matches exactly one character except `/`
//! - every other character matches itself
//!
//! ## Ignore rules
//!
//! Rules come from `.gitxignore` at the repository root (blank lines and
//! lines starting with `#` are skipped) plus the built-in rules, which always
//! apply. User rules only add exclusions; there is no `!` negation.
//!
//! - a trailing `/` restricts a rule to directories: it matches a path when
//!   one of the path's parent directories matches
//! - a rule with a `/` elsewhere is anchored at the repository root and
//!   matched against the path and its parent directory prefixes
//! - any other rule is matched against each single path component

pub mod glob;
pub mod rules;

/// Ignore-spec file at the repository root
pub const IGNORE_FILE_NAME: &str = ".gitxignore";

/// Rules applied in every repository
pub const BUILTIN_RULES: [&str; 4] = [".gitx/", ".git/", "__pycache__/", "*.pyc"];
