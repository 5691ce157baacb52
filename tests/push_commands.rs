use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteBin, FileWriteStr, PathChild};
use common::command::repository_dir;
use common::hosting::{COMMIT_SHA, RecordedCall, RecordingApi, SharedBuffer, TREE_SHA};
use gitx::areas::repository::Repository;
use gitx::artifacts::core::GitxError;
use gitx::artifacts::remote::publish::PublishOutcome;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

const ORIGIN_URL: &str = "https://github.com/octo/hello.git";

fn open(dir: &TempDir) -> (Repository, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let repository = Repository::new(
        &dir.path().to_string_lossy(),
        Box::new(buffer.clone()),
    )
    .expect("Failed to open repository");

    (repository, buffer)
}

/// Initialized repository with a remote, a token and the given files staged
async fn prepared_repository(dir: &TempDir, files: &[(&str, &[u8])]) -> (Repository, SharedBuffer) {
    let (mut repository, buffer) = open(dir);

    repository.init().await.expect("init");
    for (path, content) in files {
        dir.child(path).write_binary(content).expect("write file");
    }
    repository.add(&[".".to_string()]).await.expect("add");
    repository.add_remote("origin", ORIGIN_URL).expect("remote add");
    repository.auth("ghp_secret").expect("auth");

    (repository, buffer)
}

fn gitx_error(err: &anyhow::Error) -> Option<&GitxError> {
    err.downcast_ref::<GitxError>()
}

#[rstest]
#[tokio::test]
async fn fast_publish_creates_tree_commit_and_ref(repository_dir: TempDir) {
    let (mut repository, buffer) = prepared_repository(
        &repository_dir,
        &[("hello.txt", b"hello\n"), ("img/logo.bin", &[0x00, 0x01, 0xff])],
    )
    .await;
    repository.commit("Initial commit").await.expect("commit");
    let api = RecordingApi::default();

    let outcome = repository
        .push_with(&api, "origin", None, true)
        .await
        .expect("push");

    assert_eq!(
        outcome,
        PublishOutcome::Fast {
            commit_sha: COMMIT_SHA.to_string()
        }
    );
    assert_eq!(
        api.calls(),
        vec![
            RecordedCall::Tree {
                repo: "octo/hello".to_string(),
                token: "ghp_secret".to_string(),
                entries: vec![
                    ("hello.txt".to_string(), "aGVsbG8K".to_string()),
                    ("img/logo.bin".to_string(), "AAH/".to_string()),
                ],
            },
            RecordedCall::Commit {
                message: "Initial commit".to_string(),
                tree: TREE_SHA.to_string(),
            },
            RecordedCall::Ref {
                branch: "main".to_string(),
                sha: COMMIT_SHA.to_string(),
            },
        ]
    );

    let output = buffer.contents();
    assert!(output.contains(&format!("Pushing to {}...", ORIGIN_URL)));
    assert!(output.contains("Preparing hello.txt (text)"));
    assert!(output.contains("Preparing img/logo.bin (binary)"));
    assert!(output.contains("Push completed successfully: 22222222"));
}

#[rstest]
#[tokio::test]
async fn push_targets_the_named_remote_branch(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    repository.commit("message").await.expect("commit");
    let api = RecordingApi::default();

    repository
        .push_with(&api, "origin", Some("release"), false)
        .await
        .expect("push");

    assert_eq!(
        api.calls().last(),
        Some(&RecordedCall::Ref {
            branch: "release".to_string(),
            sha: COMMIT_SHA.to_string(),
        })
    );
}

#[rstest]
#[case::tree_conflict("tree", 409, "Git Repository is empty.")]
#[case::ref_conflict("ref", 409, "Reference update failed")]
#[case::empty_repository("tree", 404, "This repository is empty")]
#[tokio::test]
async fn rejected_fast_publish_falls_back_to_one_write_per_file(
    repository_dir: TempDir,
    #[case] failing_call: &str,
    #[case] status: u16,
    #[case] detail: &str,
) {
    let (mut repository, buffer) = prepared_repository(
        &repository_dir,
        &[("a.txt", b"a"), ("b/c.txt", b"c"), ("d.bin", &[0xff])],
    )
    .await;
    repository.commit("message").await.expect("commit");
    let api = RecordingApi::default().failing(
        failing_call,
        status,
        &format!("HTTP {}: {}", status, detail),
    );

    let outcome = repository
        .push_with(&api, "origin", None, false)
        .await
        .expect("push");

    assert_eq!(
        outcome,
        PublishOutcome::Fallback {
            created: vec!["a.txt".to_string(), "b/c.txt".to_string(), "d.bin".to_string()],
            failed: vec![],
        }
    );
    assert_eq!(api.put_paths(), vec!["a.txt", "b/c.txt", "d.bin"]);
    assert!(api.calls().contains(&RecordedCall::Put {
        path: "d.bin".to_string(),
        content: "/w==".to_string(),
        branch: "main".to_string(),
    }));
    assert!(buffer.contents().contains("Created"));
}

#[rstest]
#[tokio::test]
async fn fallback_continues_past_failed_files(repository_dir: TempDir) {
    let (mut repository, buffer) = prepared_repository(
        &repository_dir,
        &[("a.txt", b"a"), ("broken.txt", b"b"), ("z.txt", b"z")],
    )
    .await;
    repository.commit("message").await.expect("commit");
    let api = RecordingApi::default()
        .failing("tree", 409, "HTTP 409: Git Repository is empty.")
        .failing("put:broken.txt", 422, "HTTP 422: Invalid request");

    let outcome = repository
        .push_with(&api, "origin", None, false)
        .await
        .expect("push");

    assert!(!outcome.is_complete());
    assert_eq!(
        outcome,
        PublishOutcome::Fallback {
            created: vec!["a.txt".to_string(), "z.txt".to_string()],
            failed: vec![GitxError::PerFileWriteFailed {
                path: "broken.txt".to_string(),
                detail: "HTTP 422: Invalid request".to_string(),
            }],
        }
    );
    assert_eq!(api.put_paths(), vec!["a.txt", "broken.txt", "z.txt"]);

    let output = buffer.contents();
    assert!(output.contains("failed to write broken.txt: HTTP 422: Invalid request"));
    assert!(output.contains("2 created, 1 failed"));
}

#[rstest]
#[case::unprocessable("commit", 422, "HTTP 422: Invalid tree")]
#[case::unauthorized("tree", 401, "HTTP 401: Bad credentials")]
#[tokio::test]
async fn other_fast_publish_errors_abort_without_fallback(
    repository_dir: TempDir,
    #[case] failing_call: &str,
    #[case] status: u16,
    #[case] detail: &str,
) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    repository.commit("message").await.expect("commit");
    let api = RecordingApi::default().failing(failing_call, status, detail);

    let err = repository
        .push_with(&api, "origin", None, false)
        .await
        .unwrap_err();

    assert_eq!(
        gitx_error(&err),
        Some(&GitxError::remote_request_failed(Some(status), detail))
    );
    assert!(api.put_paths().is_empty());
}

#[rstest]
#[tokio::test]
async fn nothing_to_push_makes_no_remote_calls(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    let api = RecordingApi::default();

    let err = repository
        .push_with(&api, "origin", None, false)
        .await
        .unwrap_err();

    assert_eq!(gitx_error(&err), Some(&GitxError::NothingToPush));
    assert!(api.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_commit_object_is_reported(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    let commit_id = repository.commit("message").await.expect("commit");
    std::fs::remove_file(
        repository_dir
            .child(".gitx/objects")
            .child(commit_id.as_ref())
            .path(),
    )
    .expect("remove commit object");
    let api = RecordingApi::default();

    let err = repository
        .push_with(&api, "origin", None, false)
        .await
        .unwrap_err();

    assert_eq!(gitx_error(&err), Some(&GitxError::CommitNotFound(commit_id)));
    assert!(api.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn remote_resolution_errors(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    repository.commit("message").await.expect("commit");
    repository
        .add_remote("mirror", "https://gitlab.com/octo/hello")
        .expect("remote add");
    let api = RecordingApi::default();

    let err = repository
        .push_with(&api, "upstream", None, false)
        .await
        .unwrap_err();
    assert_eq!(
        gitx_error(&err),
        Some(&GitxError::RemoteNotFound("upstream".to_string()))
    );

    let err = repository
        .push_with(&api, "mirror", None, false)
        .await
        .unwrap_err();
    assert_eq!(
        gitx_error(&err),
        Some(&GitxError::UnsupportedRemote(
            "https://gitlab.com/octo/hello".to_string()
        ))
    );
    assert!(api.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_token_is_unauthenticated(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[("a.txt", b"a")]).await;
    repository.commit("message").await.expect("commit");
    std::fs::write(repository_dir.child(".gitx/auth").path(), r#"{"token": null}"#)
        .expect("reset auth");
    let api = RecordingApi::default();

    let err = repository
        .push_with(&api, "origin", None, false)
        .await
        .unwrap_err();

    assert_eq!(gitx_error(&err), Some(&GitxError::Unauthenticated));
    assert!(api.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn empty_commit_has_nothing_to_publish(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[]).await;
    repository.commit("empty").await.expect("commit");
    let api = RecordingApi::default();

    let err = repository
        .push_with(&api, "origin", None, false)
        .await
        .unwrap_err();

    assert_eq!(gitx_error(&err), Some(&GitxError::EmptyTree));
    assert!(api.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn text_file_round_trips_through_commit(repository_dir: TempDir) {
    let (mut repository, _) = prepared_repository(&repository_dir, &[]).await;
    repository_dir
        .child("hello.txt")
        .write_str("hello\n")
        .expect("write file");
    repository
        .add(&["hello.txt".to_string()])
        .await
        .expect("add");

    let commit_id = repository.commit("hello").await.expect("commit");

    let commit = repository
        .database()
        .parse_object_as_commit(&commit_id)
        .expect("commit stored");
    let entry = &commit.tree()["hello.txt"];
    let blob = repository
        .database()
        .parse_object_as_blob(&entry.oid)
        .expect("blob stored");
    assert_eq!(blob.data().as_ref(), b"hello\n");
    assert_eq!(entry.content.to_bytes().expect("decodable"), b"hello\n");
}
