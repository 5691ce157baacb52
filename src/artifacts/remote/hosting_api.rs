use crate::artifacts::core::GitxError;
use crate::artifacts::remote::remote_url::RemoteUrl;
use crate::artifacts::remote::tree_entry::RemoteTreeEntry;
use derive_new::new;

/// Authenticated remote repository every call is addressed to
#[derive(Debug, Clone, new)]
pub struct RemoteTarget {
    pub url: RemoteUrl,
    pub token: String,
}

/// Hosting provider REST calls used by push
///
/// Every method fails with `GitxError::RemoteRequestFailed` when the call
/// gets no answer or a non-2xx answer.
#[allow(async_fn_in_trait)]
pub trait HostingApi {
    /// Create a tree from all entries in one batch, returning its digest
    async fn create_tree(
        &self,
        target: &RemoteTarget,
        entries: &[RemoteTreeEntry],
    ) -> Result<String, GitxError>;

    /// Create a parentless commit on top of a tree, returning its digest
    async fn create_commit(
        &self,
        target: &RemoteTarget,
        message: &str,
        tree_sha: &str,
    ) -> Result<String, GitxError>;

    /// Create `refs/heads/<branch>` pointing at a commit
    async fn create_ref(
        &self,
        target: &RemoteTarget,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), GitxError>;

    /// Create or update one file through the contents API
    async fn put_contents(
        &self,
        target: &RemoteTarget,
        entry: &RemoteTreeEntry,
        message: &str,
        branch: &str,
    ) -> Result<(), GitxError>;
}
