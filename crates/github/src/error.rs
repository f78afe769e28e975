use thiserror::Error;

/// Result type for repository access operations
pub type Result<T> = std::result::Result<T, GithubError>;

/// Errors that can occur while talking to the GitHub contents API
#[derive(Error, Debug)]
pub enum GithubError {
    /// The repository URL could not be reduced to owner/repo
    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),

    /// Failed to build the API URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A file read resolved to a directory listing
    #[error("'{0}' is a directory, not a file")]
    NotAFile(String),

    /// File entry without a content field
    #[error("No content returned for '{0}'")]
    MissingContent(String),

    /// File entry with a transport encoding we do not understand
    #[error("Unexpected encoding '{encoding}' for '{name}'")]
    UnexpectedEncoding { name: String, encoding: String },

    /// Malformed base64 in a file's content field
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded file content that is not UTF-8 text
    #[error("Content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl GithubError {
    /// Create an invalid-repo-URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl(url.into())
    }
}
