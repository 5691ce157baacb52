use gitx::artifacts::core::GitxError;
use gitx::artifacts::remote::hosting_api::{HostingApi, RemoteTarget};
use gitx::artifacts::remote::tree_entry::RemoteTreeEntry;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub const TREE_SHA: &str = "1111111111111111111111111111111111111111";
pub const COMMIT_SHA: &str = "2222222222222222222222222222222222222222";

/// A hosting API call as the fake received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Tree {
        repo: String,
        token: String,
        entries: Vec<(String, String)>,
    },
    Commit {
        message: String,
        tree: String,
    },
    Ref {
        branch: String,
        sha: String,
    },
    Put {
        path: String,
        content: String,
        branch: String,
    },
}

/// Hosting API fake recording every call
///
/// Failures are keyed by call: `tree`, `commit`, `ref` or `put:<path>`.
#[derive(Default)]
pub struct RecordingApi {
    calls: RefCell<Vec<RecordedCall>>,
    failures: HashMap<String, GitxError>,
}

impl RecordingApi {
    pub fn failing(mut self, call: &str, status: u16, detail: &str) -> Self {
        self.failures.insert(
            call.to_string(),
            GitxError::remote_request_failed(Some(status), detail),
        );
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn put_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Put { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn record(&self, key: &str, call: RecordedCall) -> Result<(), GitxError> {
        self.calls.borrow_mut().push(call);

        match self.failures.get(key) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl HostingApi for RecordingApi {
    async fn create_tree(
        &self,
        target: &RemoteTarget,
        entries: &[RemoteTreeEntry],
    ) -> Result<String, GitxError> {
        let call = RecordedCall::Tree {
            repo: target.url.to_string(),
            token: target.token.clone(),
            entries: entries
                .iter()
                .map(|entry| (entry.path.clone(), entry.content.clone()))
                .collect(),
        };

        self.record("tree", call).map(|_| TREE_SHA.to_string())
    }

    async fn create_commit(
        &self,
        _: &RemoteTarget,
        message: &str,
        tree_sha: &str,
    ) -> Result<String, GitxError> {
        let call = RecordedCall::Commit {
            message: message.to_string(),
            tree: tree_sha.to_string(),
        };

        self.record("commit", call).map(|_| COMMIT_SHA.to_string())
    }

    async fn create_ref(
        &self,
        _: &RemoteTarget,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), GitxError> {
        let call = RecordedCall::Ref {
            branch: branch.to_string(),
            sha: commit_sha.to_string(),
        };

        self.record("ref", call)
    }

    async fn put_contents(
        &self,
        _: &RemoteTarget,
        entry: &RemoteTreeEntry,
        _: &str,
        branch: &str,
    ) -> Result<(), GitxError> {
        let call = RecordedCall::Put {
            path: entry.path.clone(),
            content: entry.content.clone(),
            branch: branch.to_string(),
        };

        self.record(&format!("put:{}", entry.path), call)
    }
}

/// Writer whose output stays readable after it was handed to a repository
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
