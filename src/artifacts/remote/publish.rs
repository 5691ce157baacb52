use crate::artifacts::core::GitxError;
use crate::artifacts::remote::hosting_api::{HostingApi, RemoteTarget};
use crate::artifacts::remote::tree_entry::RemoteTreeEntry;
use derive_new::new;
use tracing::{debug, info, warn};

/// Result of a publish that did not fail as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Tree, commit and ref were created in one batch
    Fast { commit_sha: String },
    /// Files were written one by one; some writes may have failed
    Fallback {
        created: Vec<String>,
        failed: Vec<GitxError>,
    },
}

impl PublishOutcome {
    pub fn is_complete(&self) -> bool {
        match self {
            PublishOutcome::Fast { .. } => true,
            PublishOutcome::Fallback { failed, .. } => failed.is_empty(),
        }
    }
}

/// Observer of per-file progress during fallback publish
pub trait PublishReporter {
    fn file_created(&mut self, path: &str);

    fn file_failed(&mut self, error: &GitxError);
}

/// Two-phase publisher over a hosting API
#[derive(new)]
pub struct Publisher<'a, A: HostingApi> {
    api: &'a A,
    target: &'a RemoteTarget,
}

impl<A: HostingApi> Publisher<'_, A> {
    /// Publish a tree as a parentless commit on `branch`
    ///
    /// Falls back to per-file writes only when the fast path is rejected
    /// with a conflict or an empty-repository error; any other fast-path
    /// error is returned as is.
    pub async fn publish(
        &self,
        entries: &[RemoteTreeEntry],
        message: &str,
        branch: &str,
        reporter: &mut impl PublishReporter,
    ) -> Result<PublishOutcome, GitxError> {
        match self.fast_publish(entries, message, branch).await {
            Ok(commit_sha) => {
                info!(%commit_sha, "fast publish completed");
                Ok(PublishOutcome::Fast { commit_sha })
            }
            Err(err) if is_fallback_trigger(&err) => {
                info!(error = %err, "fast publish rejected, falling back to per-file writes");
                Ok(self.fallback_publish(entries, message, branch, reporter).await)
            }
            Err(err) => Err(err),
        }
    }

    async fn fast_publish(
        &self,
        entries: &[RemoteTreeEntry],
        message: &str,
        branch: &str,
    ) -> Result<String, GitxError> {
        let tree_sha = self.api.create_tree(self.target, entries).await?;
        debug!(%tree_sha, "created remote tree");

        let commit_sha = self.api.create_commit(self.target, message, &tree_sha).await?;
        debug!(%commit_sha, "created remote commit");

        self.api.create_ref(self.target, branch, &commit_sha).await?;
        debug!(%branch, "created remote ref");

        Ok(commit_sha)
    }

    async fn fallback_publish(
        &self,
        entries: &[RemoteTreeEntry],
        message: &str,
        branch: &str,
        reporter: &mut impl PublishReporter,
    ) -> PublishOutcome {
        let mut created = Vec::new();
        let mut failed = Vec::new();

        for entry in entries {
            match self.api.put_contents(self.target, entry, message, branch).await {
                Ok(()) => {
                    reporter.file_created(&entry.path);
                    created.push(entry.path.clone());
                }
                Err(err) => {
                    let err = GitxError::PerFileWriteFailed {
                        path: entry.path.clone(),
                        detail: match err {
                            GitxError::RemoteRequestFailed { detail, .. } => detail,
                            other => other.to_string(),
                        },
                    };
                    warn!(error = %err, "contents write failed");
                    reporter.file_failed(&err);
                    failed.push(err);
                }
            }
        }

        PublishOutcome::Fallback { created, failed }
    }
}

/// Conflict-class answers and empty-repository errors switch to per-file writes
pub fn is_fallback_trigger(err: &GitxError) -> bool {
    match err {
        GitxError::RemoteRequestFailed { status, detail } => {
            *status == Some(409) || detail.to_lowercase().contains("empty")
        }
        _ => false,
    }
}
