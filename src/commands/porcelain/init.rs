use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use tracing::info;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(self.writer(), "Repository already exists")?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitx/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitx/refs/heads directory")?;

        self.config()
            .init()
            .context("Failed to create .gitx/config")?;

        self.refs()
            .set_head(&BranchName::default())
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let index = index.lock().await;
        // create the index file if it does not exist
        if !index.path().exists() {
            fs::write(index.path(), b"{}").context("Failed to create .gitx/index file")?;
        }

        info!(path = %self.path().display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty gitx repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
