use crate::error::{GithubError, Result};
use crate::repo::RepoRef;
use crate::types::{ContentsResponse, EntryKind, FileContents, FolderContents};
use reqwest::header::ACCEPT;
use reqwest::Client;

const USER_AGENT: &str = concat!("repofind/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub contents API.
///
/// Single-attempt semantics: every call issues exactly one request and
/// blocks until the remote responds or the transport fails. A non-success
/// status is logged and returned as `None`; transport failures are errors.
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    /// Create an unauthenticated client (subject to anonymous rate limits)
    pub fn new() -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, token: None })
    }

    /// Create a client, picking up a bearer token from `GITHUB_TOKEN` when
    /// one is set
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        Ok(Self {
            token,
            ..Self::new()?
        })
    }

    /// Attach a bearer token for authenticated requests
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetch one level of a directory listing. A lone file or directory
    /// object is normalized into a one-element listing.
    pub async fn list(&self, repo: &RepoRef, path: Option<&str>) -> Result<Option<FolderContents>> {
        Ok(self.contents(repo, path).await?.map(FolderContents::from))
    }

    /// Fetch one file's metadata and content, decoded into text.
    pub async fn read(&self, repo: &RepoRef, path: &str) -> Result<Option<FileContents>> {
        let Some(response) = self.contents(repo, Some(path)).await? else {
            return Ok(None);
        };

        let entry = match response {
            ContentsResponse::One(entry) => entry,
            ContentsResponse::Many(_) => return Err(GithubError::NotAFile(path.to_string())),
        };
        if entry.kind == EntryKind::Dir {
            return Err(GithubError::NotAFile(path.to_string()));
        }

        FileContents::decode(entry).map(Some)
    }

    /// One GET against the contents endpoint. Non-success responses are
    /// reported and collapse to `None`; no retry, no backoff.
    async fn contents(
        &self,
        repo: &RepoRef,
        path: Option<&str>,
    ) -> Result<Option<ContentsResponse>> {
        let url = repo.contents_url(path)?;

        let mut request = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!(
                "Unable to fetch repository contents: HTTP {status} for '{}'",
                path.unwrap_or("")
            );
            log::debug!(
                "response body from {url}: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(None);
        }

        Ok(Some(response.json::<ContentsResponse>().await?))
    }
}
