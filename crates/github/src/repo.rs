use crate::error::{GithubError, Result};
use std::str::FromStr;
use url::Url;

const API_ROOT: &str = "https://api.github.com";

/// Owner/repository pair identifying one GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse a repository URL of the form `https://github.com/{owner}/{repo}`.
    ///
    /// The scheme, a trailing `/` and a `.git` suffix are all optional; the
    /// owner and repository are the last two path segments.
    pub fn parse(repo_url: &str) -> Result<Self> {
        let trimmed = repo_url
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        let mut segments = trimmed.rsplit('/');
        let repo = segments.next().unwrap_or_default();
        let owner = segments.next().unwrap_or_default();
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if owner.is_empty() || repo.is_empty() || owner.contains('.') {
            return Err(GithubError::invalid_repo_url(repo_url));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Build the contents API URL for an optional path inside the
    /// repository. Path segments are percent-encoded individually so `/`
    /// separators survive.
    pub fn contents_url(&self, path: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(API_ROOT)?;
        {
            let mut segments = url
                .path_segments_mut()
                .expect("https URL always has path segments");
            segments.extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"]);
            if let Some(path) = path {
                segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
            }
        }
        Ok(url)
    }
}

impl FromStr for RepoRef {
    type Err = GithubError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_plain_repo_url() {
        let repo = RepoRef::parse("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.repo, "rust");
    }

    #[test]
    fn parses_trailing_slash_and_git_suffix() {
        let repo = RepoRef::parse("https://github.com/user/project.git/").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.repo, "project");
    }

    #[test]
    fn parses_schemeless_url() {
        let repo = RepoRef::parse("github.com/user/project").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.repo, "project");
    }

    #[test]
    fn rejects_url_without_owner() {
        assert!(RepoRef::parse("https://github.com/onlyrepo").is_err());
        assert!(RepoRef::parse("").is_err());
    }

    #[test]
    fn contents_url_without_path() {
        let repo = RepoRef::parse("https://github.com/user/project").unwrap();
        let url = repo.contents_url(None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/user/project/contents"
        );
    }

    #[test]
    fn contents_url_encodes_path_segments() {
        let repo = RepoRef::parse("https://github.com/user/project").unwrap();
        let url = repo.contents_url(Some("src/my module/file.py")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/user/project/contents/src/my%20module/file.py"
        );
    }
}
