use crate::artifacts::core::GitxError;
use reqwest::Url;

const GITHUB_HOST: &str = "github.com";

/// Repository addressed by a hosting URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    owner: String,
    repo: String,
}

impl RemoteUrl {
    /// Parse `https://github.com/<owner>/<repo>[.git]`
    ///
    /// Scheme and host are case-insensitive; any further path segments,
    /// the query and the fragment are ignored.
    pub fn try_parse(url: &str) -> Result<Self, GitxError> {
        let unsupported = || GitxError::UnsupportedRemote(url.to_string());

        let parsed = Url::parse(url.trim()).map_err(|_| unsupported())?;
        if parsed.scheme() != "https" || parsed.host_str() != Some(GITHUB_HOST) {
            return Err(unsupported());
        }

        let mut segments = parsed
            .path_segments()
            .ok_or_else(unsupported)?
            .filter(|segment| !segment.is_empty());

        let owner = segments.next();
        let repo = segments
            .next()
            .map(|repo| repo.strip_suffix(".git").unwrap_or(repo))
            .filter(|repo| !repo.is_empty());

        match (owner, repo) {
            (Some(owner), Some(repo)) => Ok(RemoteUrl {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(unsupported()),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl std::fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
