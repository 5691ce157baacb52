use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::ignore::IGNORE_FILE_NAME;
use crate::artifacts::ignore::glob::GlobPattern;
use crate::artifacts::ignore::rules::IgnoreRules;
use crate::artifacts::index::index_entry::IndexEntry;
use std::path::Path;
use tracing::{debug, warn};

impl Repository {
    /// Stage every file selected by `patterns`
    ///
    /// A pattern naming a directory (`.` included) selects all files below
    /// it, a pattern naming a file selects that file, and any other pattern
    /// is a glob matched against the trailing components of each path.
    /// The ignore file is staged first and is exempt from its own rules.
    /// A file that cannot be read is reported and skipped, and so is a
    /// pattern that resolves outside the repository root.
    pub async fn add(&mut self, patterns: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let rules = IgnoreRules::load(self.path())?;

        let selections = patterns
            .iter()
            .map(|pattern| self.resolve_pattern(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        if selections
            .iter()
            .flatten()
            .flatten()
            .any(|path| path == IGNORE_FILE_NAME)
        {
            self.stage_file(&mut *index, IGNORE_FILE_NAME)?;
        }

        for (pattern, selection) in patterns.iter().zip(&selections) {
            let Some(selection) = selection else {
                warn!(%pattern, "pathspec is outside the repository");
                writeln!(self.writer(), "Skipped {}: outside the repository", pattern)?;
                continue;
            };

            if selection.is_empty() {
                warn!(%pattern, "pathspec did not match any files");
                continue;
            }

            for path in selection {
                if path == IGNORE_FILE_NAME {
                    continue;
                }

                if rules.should_ignore(path) {
                    debug!(%path, "skipping ignored file");
                    continue;
                }

                self.stage_file(&mut *index, path)?;
            }
        }

        index.write_updates()?;

        Ok(())
    }

    /// Stage one file, reporting a read failure instead of returning it
    fn stage_file(&self, index: &mut Index, path: &str) -> anyhow::Result<()> {
        match self.workspace().parse_index_entry(Path::new(path)) {
            Ok(entry) => {
                if entry.is_binary() {
                    writeln!(self.writer(), "Added binary file {}", path)?;
                } else {
                    writeln!(self.writer(), "Added {}", path)?;
                }
                debug!(%path, oid = %entry.oid, binary = entry.is_binary(), "staged file");
                index.add(entry);
            }
            Err(err) => {
                warn!(%path, error = %err, "failed to stage file");
                writeln!(self.writer(), "Error adding {}: {:#}", path, err)?;
            }
        }

        Ok(())
    }

    /// Repository-relative, `/`-separated paths selected by a pattern
    ///
    /// `None` when the pattern names an existing file or directory outside
    /// the repository root.
    fn resolve_pattern(&self, pattern: &str) -> anyhow::Result<Option<Vec<String>>> {
        let trimmed = pattern.trim_start_matches("./");
        let trimmed = match trimmed {
            "" => ".",
            "/" => "/",
            _ => trimmed.trim_end_matches('/'),
        };
        let pattern_path = Path::new(trimmed);
        let workspace = self.workspace();

        let names_existing = workspace.is_dir(pattern_path) || workspace.is_file(pattern_path);
        if names_existing && !workspace.contains(pattern_path) {
            return Ok(None);
        }

        let paths = if workspace.is_dir(pattern_path) {
            let root = (trimmed != ".").then_some(pattern_path);
            workspace
                .list_files(root)?
                .iter()
                .filter_map(|path| workspace.relative_key(path))
                .collect()
        } else if workspace.is_file(pattern_path) {
            workspace.relative_key(pattern_path).into_iter().collect()
        } else {
            let glob = GlobPattern::try_parse(trimmed)?;
            workspace
                .list_files(None)?
                .iter()
                .map(|path| IndexEntry::key_from_path(path))
                .filter(|path| glob.matches_suffix(path))
                .collect()
        };

        Ok(Some(paths))
    }
}
