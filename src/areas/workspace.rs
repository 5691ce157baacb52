use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata directories never descended into
const IGNORED_PATHS: [&str; 2] = [".gitx", ".git"];

/// Working tree rooted at the repository directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repository-relative paths of all regular files below `root_file_path`
    ///
    /// `root_file_path` is relative to the repository root and defaults to
    /// it. Naming a file yields that file alone. Results are sorted.
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        if root_file_path.is_file() {
            return Ok(vec![
                root_file_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ]);
        }

        let mut files = WalkDir::new(&root_file_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    /// `/`-separated repository-relative form of an existing path
    ///
    /// `None` when the path resolves outside the repository root, through
    /// `..` components, an absolute path or a symlink.
    pub fn relative_key(&self, path: &Path) -> Option<String> {
        let root = self.path.canonicalize().ok()?;
        let resolved = self.path.join(path).canonicalize().ok()?;

        resolved
            .strip_prefix(&root)
            .ok()
            .map(IndexEntry::key_from_path)
    }

    /// Whether an existing path lies below the repository root
    pub fn contains(&self, path: &Path) -> bool {
        self.relative_key(path).is_some()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path).with_context(|| format!("Unable to read {}", file_path.display()))
    }

    /// Modification time in seconds since the epoch
    pub fn stat_mtime(&self, file_path: &Path) -> anyhow::Result<f64> {
        let file_path = self.path.join(file_path);
        let metadata = std::fs::metadata(&file_path)
            .with_context(|| format!("Unable to stat {}", file_path.display()))?;

        Ok(IndexEntry::mtime_from(metadata.modified()?))
    }

    /// Stage-ready entry for a file
    pub fn parse_index_entry(&self, file_path: &Path) -> anyhow::Result<IndexEntry> {
        let data = self.read_file(file_path)?;
        let mtime = self.stat_mtime(file_path)?;

        Ok(IndexEntry::from_bytes(
            IndexEntry::key_from_path(file_path),
            data,
            mtime,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_nested_files_without_metadata_dirs() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("b.txt").write_str("b")?;
        dir.child("a/c.txt").write_str("c")?;
        dir.child(".gitx/objects/0000").write_str("object")?;
        dir.child(".git/HEAD").write_str("ref")?;
        let workspace = Workspace::new(dir.path().into());

        let files = workspace
            .list_files(None)?
            .iter()
            .map(|path| IndexEntry::key_from_path(path))
            .collect::<Vec<_>>();

        assert_eq!(files, vec!["a/c.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn naming_a_file_lists_only_that_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a/c.txt").write_str("c")?;
        let workspace = Workspace::new(dir.path().into());

        let files = workspace.list_files(Some(Path::new("a/c.txt")))?;

        assert_eq!(files, vec![PathBuf::from("a").join("c.txt")]);
        assert!(workspace.list_files(Some(Path::new("missing"))).is_err());
        Ok(())
    }

    #[test]
    fn index_entries_are_keyed_by_slash_separated_path() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a/b/c.bin").write_binary(&[0x00, 0x01, 0xff])?;
        let workspace = Workspace::new(dir.path().into());

        let entry = workspace.parse_index_entry(&Path::new("a").join("b").join("c.bin"))?;

        assert_eq!(entry.name, "a/b/c.bin");
        assert!(entry.is_binary());
        assert_eq!(entry.content.content, "AAH/");
        Ok(())
    }

    #[test]
    fn relative_keys_stay_inside_the_repository() -> anyhow::Result<()> {
        let parent = TempDir::new()?;
        parent.child("repo/a/b.txt").write_str("b")?;
        parent.child("secret.txt").write_str("outside")?;
        let workspace = Workspace::new(parent.child("repo").path().into());

        assert_eq!(
            workspace.relative_key(&Path::new("a").join("b.txt")),
            Some("a/b.txt".to_string())
        );
        assert_eq!(workspace.relative_key(Path::new("a/../a/b.txt")), Some("a/b.txt".to_string()));
        assert_eq!(workspace.relative_key(Path::new("../secret.txt")), None);
        assert_eq!(workspace.relative_key(parent.child("secret.txt").path()), None);
        assert_eq!(workspace.relative_key(Path::new("missing.txt")), None);
        assert!(workspace.contains(Path::new(".")));
        assert!(!workspace.contains(Path::new("..")));
        Ok(())
    }
}
