use crate::artifacts::core::GitxError;
use crate::artifacts::objects::commit::Commit;
use serde::Serialize;

/// Mode of every published file: a regular, non-executable blob
pub const REGULAR_FILE_MODE: &str = "100644";

/// Entry of a hosting API tree creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteTreeEntry {
    pub path: String,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Base64 of the original file bytes
    pub content: String,
    #[serde(skip)]
    pub is_binary: bool,
}

impl RemoteTreeEntry {
    pub fn file_kind(&self) -> &'static str {
        if self.is_binary { "binary" } else { "text" }
    }
}

/// Build the remote tree of a commit, in path order
pub fn build_tree(commit: &Commit) -> Result<Vec<RemoteTreeEntry>, GitxError> {
    if commit.tree().is_empty() {
        return Err(GitxError::EmptyTree);
    }

    Ok(commit
        .tree()
        .iter()
        .map(|(path, entry)| RemoteTreeEntry {
            path: path.clone(),
            mode: REGULAR_FILE_MODE,
            kind: "blob",
            content: entry.content.to_base64(),
            is_binary: entry.content.is_binary,
        })
        .collect())
}
