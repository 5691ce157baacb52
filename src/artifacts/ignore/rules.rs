use crate::artifacts::ignore::glob::GlobPattern;
use crate::artifacts::ignore::{BUILTIN_RULES, IGNORE_FILE_NAME};
use anyhow::Context;
use std::path::Path;

/// A single ignore rule
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    glob: GlobPattern,
    dir_only: bool,
    anchored: bool,
}

impl IgnoreRule {
    /// Parse one rule line, `None` for lines that carry no rule
    pub fn try_parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let dir_only = line.ends_with('/');
        let pattern = line.trim_end_matches('/');
        let anchored = pattern.contains('/');
        let pattern = pattern.trim_start_matches('/');

        if pattern.is_empty() {
            return Ok(None);
        }

        Ok(Some(IgnoreRule {
            glob: GlobPattern::try_parse(pattern)?,
            dir_only,
            anchored,
        }))
    }

    pub fn source(&self) -> &str {
        self.glob.source()
    }

    pub fn matches(&self, path: &str) -> bool {
        let components = path.split('/').collect::<Vec<_>>();
        // directory-only rules never match the file name itself
        let candidates = if self.dir_only {
            components.len().saturating_sub(1)
        } else {
            components.len()
        };

        if self.anchored {
            (1..=candidates).any(|len| self.glob.matches(&components[..len].join("/")))
        } else {
            components[..candidates]
                .iter()
                .any(|component| self.glob.matches(component))
        }
    }
}

/// Built-in rules plus the rules of `.gitxignore`
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_patterns(BUILTIN_RULES)
    }

    pub fn from_patterns<'p>(patterns: impl IntoIterator<Item = &'p str>) -> anyhow::Result<Self> {
        let rules = patterns
            .into_iter()
            .map(IgnoreRule::try_parse)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        Ok(IgnoreRules { rules })
    }

    /// Load the rules of a repository rooted at `root`
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let ignore_file = root.join(IGNORE_FILE_NAME);
        let user_rules = if ignore_file.is_file() {
            std::fs::read_to_string(&ignore_file)
                .with_context(|| format!("Unable to read {}", ignore_file.display()))?
        } else {
            String::new()
        };

        Self::from_patterns(user_rules.lines().chain(BUILTIN_RULES))
    }

    pub fn should_ignore(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }
}
