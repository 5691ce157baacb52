use crate::areas::repository::Repository;
use crate::artifacts::core::GitxError;
use crate::artifacts::remote::github::GitHubClient;
use crate::artifacts::remote::hosting_api::{HostingApi, RemoteTarget};
use crate::artifacts::remote::publish::{PublishOutcome, PublishReporter, Publisher};
use crate::artifacts::remote::remote_url::RemoteUrl;
use crate::artifacts::remote::tree_entry::build_tree;
use colored::Colorize;
use tracing::{debug, info, warn};

/// Prints per-file fallback progress to the repository writer
struct WriterReporter<'r> {
    repository: &'r Repository,
}

impl PublishReporter for WriterReporter<'_> {
    fn file_created(&mut self, path: &str) {
        if let Err(err) = writeln!(self.repository.writer(), "{} {}", "Created".green(), path) {
            warn!(error = %err, "unable to report created file");
        }
    }

    fn file_failed(&mut self, error: &GitxError) {
        if let Err(err) = writeln!(self.repository.writer(), "{} {}", "Failed".red(), error) {
            warn!(error = %err, "unable to report failed file");
        }
    }
}

impl Repository {
    /// Publish the latest commit of the current branch to `remote_name`
    ///
    /// The commit lands on `remote_branch` on the remote, defaulting to the
    /// name of the current branch.
    pub async fn push(
        &mut self,
        remote_name: &str,
        remote_branch: Option<&str>,
        set_upstream: bool,
    ) -> anyhow::Result<PublishOutcome> {
        let api = GitHubClient::from_env()?;
        debug!(api_url = api.api_url(), "using hosting API");

        self.push_with(&api, remote_name, remote_branch, set_upstream)
            .await
    }

    /// Same as `push`, over any hosting API
    pub async fn push_with<A: HostingApi>(
        &mut self,
        api: &A,
        remote_name: &str,
        remote_branch: Option<&str>,
        set_upstream: bool,
    ) -> anyhow::Result<PublishOutcome> {
        self.ensure_initialized()?;

        // resolve remote
        let config = self.config().load()?;
        let url = config
            .remotes
            .get(remote_name)
            .ok_or_else(|| GitxError::RemoteNotFound(remote_name.to_string()))?;
        let remote_url = RemoteUrl::try_parse(url)?;

        writeln!(self.writer(), "Pushing to {}...", url)?;

        // load commit
        let local_branch = self.refs().current_branch()?;
        let commit_id = self
            .refs()
            .read_ref(&local_branch)?
            .ok_or(GitxError::NothingToPush)?;

        if !self.database().contains(&commit_id) {
            return Err(GitxError::CommitNotFound(commit_id).into());
        }
        let commit = self.database().parse_object_as_commit(&commit_id)?;

        // check auth
        let token = self
            .config()
            .load_auth()?
            .token()
            .map(str::to_string)
            .ok_or(GitxError::Unauthenticated)?;

        let remote_branch = remote_branch
            .map(str::to_string)
            .unwrap_or_else(|| local_branch.to_string());

        if set_upstream {
            info!(%local_branch, remote = %remote_name, %remote_branch, "tracking remote branch");
        }

        writeln!(
            self.writer(),
            "Pushing commit {} to {} on branch {}",
            commit_id.to_short_oid(),
            remote_url,
            remote_branch
        )?;

        // build tree
        let entries = build_tree(&commit)?;
        for entry in &entries {
            writeln!(
                self.writer(),
                "Preparing {} ({})",
                entry.path,
                entry.file_kind()
            )?;
        }

        let target = RemoteTarget::new(remote_url, token);
        let mut reporter = WriterReporter { repository: self };
        let outcome = Publisher::new(api, &target)
            .publish(&entries, commit.message(), &remote_branch, &mut reporter)
            .await?;

        match &outcome {
            PublishOutcome::Fast { commit_sha } => {
                let short_sha = commit_sha.get(..8).unwrap_or(commit_sha);
                writeln!(self.writer(), "Push completed successfully: {}", short_sha)?;
            }
            PublishOutcome::Fallback { created, failed } => {
                writeln!(
                    self.writer(),
                    "Push completed file by file: {} created, {} failed",
                    created.len(),
                    failed.len()
                )?;
            }
        }

        Ok(outcome)
    }
}
