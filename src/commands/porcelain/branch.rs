use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Rename the current branch, keeping its commits
    pub fn rename_branch(&mut self, new_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let new_name = BranchName::try_parse(new_name.to_string())?;
        self.refs().rename_branch(&new_name)?;

        writeln!(self.writer(), "Renamed branch to {}", new_name)?;

        Ok(())
    }

    /// Print the current branch, marked the way `git branch` marks it
    pub fn show_branch(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let current = self.refs().current_branch()?;
        let head = self.refs().read_head()?;

        match head {
            Some(oid) => writeln!(self.writer(), "* {} {}", current, oid.to_short_oid())?,
            None => writeln!(self.writer(), "* {} (no commits yet)", current)?,
        }

        Ok(())
    }
}
