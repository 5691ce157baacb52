//! References (HEAD and branches)
//!
//! ## Reference Types
//!
//! - HEAD: the symbolic ref of the current branch
//! - Branches: `refs/heads/*` holding the digest of the branch's latest commit
//!
//! ## File Format
//!
//! HEAD holds a plain symbolic ref such as `refs/heads/main`; a branch file
//! holds a 40-character SHA-1. An absent branch file means the branch has
//! no commits yet.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use tracing::debug;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// References manager
///
/// Ref files are written under an exclusive lock.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitx`)
    path: Box<Path>,
}

impl Refs {
    /// Symbolic ref HEAD points at
    ///
    /// Defaults to `refs/heads/main` when HEAD is missing or empty.
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(SymRefName::default());
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        // tolerate the `ref: ` form written by other tools
        let content = content.trim();
        let content = content.strip_prefix("ref: ").unwrap_or(content);

        if content.is_empty() {
            Ok(SymRefName::default())
        } else {
            Ok(SymRefName::new(content.to_string()))
        }
    }

    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        BranchName::try_parse_sym_ref_name(&self.current_ref()?)
    }

    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(
            self.head_path(),
            branch_name.to_sym_ref_name().as_ref_path().to_string(),
        )
    }

    /// Digest of the latest commit on a branch, `None` before its first commit
    pub fn read_ref(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.branch_path(branch_name);

        if !ref_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref(&self.current_branch()?)
    }

    pub fn update_ref(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        debug!(branch = %branch_name, %oid, "updating branch ref");
        self.update_ref_file(self.branch_path(branch_name), oid.as_ref().to_string())
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Point HEAD at `new_name`, carrying over the current branch's ref file
    ///
    /// Renaming to the current branch is a no-op. An existing ref file of
    /// `new_name` is overwritten.
    pub fn rename_branch(&self, new_name: &BranchName) -> anyhow::Result<()> {
        let current = self.current_branch()?;

        if &current == new_name {
            return self.set_head(new_name);
        }

        let current_path = self.branch_path(&current);
        if current_path.exists() {
            let new_path = self.branch_path(new_name);
            std::fs::create_dir_all(new_path.parent().with_context(|| {
                format!("failed to create parent directories for {:?}", new_path)
            })?)?;
            std::fs::rename(&current_path, &new_path).with_context(|| {
                format!("failed to move ref file {:?} to {:?}", current_path, new_path)
            })?;
            self.prune_branch_empty_parent_dirs(&current_path)?;
        }

        debug!(from = %current, to = %new_name, "renamed branch");
        self.set_head(new_name)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
