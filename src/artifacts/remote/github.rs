//! GitHub REST client
//!
//! Implements `HostingApi` against the git database API (`git/trees`,
//! `git/commits`, `git/refs`) and the contents API (`contents/<path>`).
//! Every request carries `Authorization: token <token>` and asks for
//! `application/vnd.github.v3+json`.

use crate::artifacts::core::GitxError;
use crate::artifacts::remote::hosting_api::{HostingApi, RemoteTarget};
use crate::artifacts::remote::tree_entry::RemoteTreeEntry;
use anyhow::Context;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "GITX_API_URL";

const ACCEPT_TYPE: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gitx/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ShaResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(api_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Unable to create HTTP client")?;

        Ok(GitHubClient {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for `GITX_API_URL`, or the public GitHub API
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Per-repository endpoint, e.g. `<api>/repos/<owner>/<repo>/git/trees`
    pub fn repo_url(&self, target: &RemoteTarget, endpoint: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url,
            target.url.owner(),
            target.url.repo(),
            endpoint
        )
    }

    /// Contents endpoint of a file, one URL path segment per path component
    pub fn contents_url(&self, target: &RemoteTarget, path: &str) -> Result<Url, GitxError> {
        let base = self.repo_url(target, "contents");
        let mut url = Url::parse(&base)
            .map_err(|err| GitxError::remote_request_failed(None, format!("{base}: {err}")))?;

        url.path_segments_mut()
            .map_err(|_| GitxError::remote_request_failed(None, format!("{base}: not a base URL")))?
            .extend(path.split('/'));

        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, GitxError> {
        let response = request
            .header(ACCEPT, ACCEPT_TYPE)
            .header(AUTHORIZATION, format!("token {token}"))
            .send()
            .await
            .map_err(|err| GitxError::remote_request_failed(None, err.to_string()))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "hosting API response");

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| GitxError::remote_request_failed(Some(status.as_u16()), err.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GitxError::remote_request_failed(
                Some(status.as_u16()),
                error_detail(status.as_u16(), &body),
            ))
        }
    }
}

/// `HTTP <status>: <message>`, using the JSON `message` field when there is one
pub fn error_detail(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    format!("HTTP {status}: {message}")
}

impl HostingApi for GitHubClient {
    async fn create_tree(
        &self,
        target: &RemoteTarget,
        entries: &[RemoteTreeEntry],
    ) -> Result<String, GitxError> {
        let request = self
            .client
            .post(self.repo_url(target, "git/trees"))
            .json(&serde_json::json!({ "tree": entries }));

        let response: ShaResponse = self.send(request, &target.token).await?;
        Ok(response.sha)
    }

    async fn create_commit(
        &self,
        target: &RemoteTarget,
        message: &str,
        tree_sha: &str,
    ) -> Result<String, GitxError> {
        let request = self
            .client
            .post(self.repo_url(target, "git/commits"))
            .json(&serde_json::json!({
                "message": message,
                "tree": tree_sha,
                "parents": [],
            }));

        let response: ShaResponse = self.send(request, &target.token).await?;
        Ok(response.sha)
    }

    async fn create_ref(
        &self,
        target: &RemoteTarget,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), GitxError> {
        let request = self
            .client
            .post(self.repo_url(target, "git/refs"))
            .json(&serde_json::json!({
                "ref": format!("refs/heads/{branch}"),
                "sha": commit_sha,
            }));

        self.send::<serde_json::Value>(request, &target.token)
            .await
            .map(|_| ())
    }

    async fn put_contents(
        &self,
        target: &RemoteTarget,
        entry: &RemoteTreeEntry,
        message: &str,
        branch: &str,
    ) -> Result<(), GitxError> {
        let request = self
            .client
            .put(self.contents_url(target, &entry.path)?)
            .json(&serde_json::json!({
                "message": message,
                "content": entry.content,
                "branch": branch,
            }));

        self.send::<serde_json::Value>(request, &target.token)
            .await
            .map(|_| ())
    }
}
