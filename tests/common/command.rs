use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteBin, FileWriteStr, PathChild};
use rstest::fixture;
use std::path::Path;

/// Unreachable API base, so no test ever talks to a real host
pub const OFFLINE_API_URL: &str = "http://127.0.0.1:9";

pub const TEST_AUTHOR: &str = "fake_user";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitx_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with a text file, a nested text file and a binary file staged
#[fixture]
pub fn staged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    init_repository_dir
        .child("1.txt")
        .write_str("hello\n")
        .expect("Failed to write file");
    init_repository_dir
        .child("a/b/2.txt")
        .write_str("two")
        .expect("Failed to write file");
    init_repository_dir
        .child("logo.bin")
        .write_binary(&[0x00, 0x01, 0xff])
        .expect("Failed to write file");

    run_gitx_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_gitx_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitx").expect("Failed to find gitx binary");
    cmd.env("GITX_API_URL", OFFLINE_API_URL);
    cmd.env_remove("GITX_AUTHOR_NAME");
    cmd.env_remove("GITX_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitx_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_gitx_command(dir, &["commit", "-m", message]);
    cmd.env("GITX_AUTHOR_NAME", TEST_AUTHOR);
    cmd
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&content).expect("Invalid JSON file")
}

pub fn read_index(dir: &Path) -> serde_json::Value {
    read_json(&dir.join(".gitx").join("index"))
}

/// Digest the current branch points at
pub fn head_commit_id(dir: &Path) -> Option<String> {
    let head = std::fs::read_to_string(dir.join(".gitx").join("HEAD")).ok()?;
    let ref_path = dir.join(".gitx").join(head.trim());

    std::fs::read_to_string(ref_path)
        .ok()
        .map(|oid| oid.trim().to_string())
}

pub fn read_object(dir: &Path, oid: &str) -> Vec<u8> {
    std::fs::read(dir.join(".gitx").join("objects").join(oid)).expect("Failed to read object")
}

pub fn object_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".gitx").join("objects"))
        .map(|entries| entries.count())
        .unwrap_or_default()
}
