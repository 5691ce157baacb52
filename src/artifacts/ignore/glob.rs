use anyhow::Context;
use regex::Regex;

/// Translate a glob into an anchored regular expression
pub fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    regex.push_str("(?:.*/)?");
                } else {
                    regex.push_str(".*");
                }
            }
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            c => regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    regex.push('$');
    regex
}

/// Compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn try_parse(pattern: &str) -> anyhow::Result<Self> {
        let regex = Regex::new(&glob_to_regex(pattern))
            .with_context(|| format!("invalid glob pattern: {pattern}"))?;

        Ok(GlobPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whole-string match
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match against the path or any of its trailing component runs
    ///
    /// `*.txt` matches `a/b/c.txt` through `c.txt`, the way a recursive glob
    /// from the repository root would.
    pub fn matches_suffix(&self, path: &str) -> bool {
        std::iter::once(path)
            .chain(path.match_indices('/').map(|(at, _)| &path[at + 1..]))
            .any(|suffix| self.matches(suffix))
    }
}
