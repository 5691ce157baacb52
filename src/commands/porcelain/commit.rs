use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, CommitTree, TreeEntry};
use crate::artifacts::objects::object_id::ObjectId;
use tracing::info;

impl Repository {
    /// Snapshot the whole index into a root commit on the current branch
    ///
    /// Blobs are written before the commit record, and the branch ref is
    /// only moved once both are durable.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let branch = self.refs().current_branch()?;

        let tree = index
            .entries()
            .map(|entry| (entry.name.clone(), TreeEntry::from(entry)))
            .collect::<CommitTree>();

        for entry in index.entries() {
            let blob = Blob::new(entry.content.to_bytes()?.into(), entry.is_binary());
            let blob_id = self.database().store(&blob)?;

            if blob_id != entry.oid {
                anyhow::bail!(
                    "staged content of {} does not match its digest {}",
                    entry.name,
                    entry.oid
                );
            }
        }

        let config = self.config().load()?;
        let author = Commit::resolve_author(config.author.as_deref());

        let commit = Commit::new(tree, author, message.to_string())?;
        let commit_id = self.database().store(&commit)?;
        self.refs().update_ref(&branch, &commit_id)?;

        info!(%branch, oid = %commit_id, files = index.len(), "created commit");
        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
