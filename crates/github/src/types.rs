use crate::error::{GithubError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Entry type reported by the contents API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    /// Symlinks, submodules and whatever GitHub adds next; grouped with
    /// files for listing purposes.
    #[serde(other)]
    Other,
}

/// One object from a contents API response
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    /// Transport-encoded file content; present only for file reads.
    /// GitHub wraps the base64 payload with newlines.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// A contents response is an array for directories but a single object for
/// a lone file or directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    Many(Vec<ContentsEntry>),
    One(ContentsEntry),
}

/// One level of a repository's directory tree. Rebuilt fresh per listing
/// call; entries keep the remote's ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderContents {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl FolderContents {
    fn push(&mut self, entry: ContentsEntry) {
        match entry.kind {
            EntryKind::Dir => self.directories.push(entry.name),
            EntryKind::File | EntryKind::Other => self.files.push(entry.name),
        }
    }
}

impl From<ContentsResponse> for FolderContents {
    /// Normalize a listing; a single bare object becomes a one-element
    /// directory or file list.
    fn from(response: ContentsResponse) -> Self {
        let mut folder = Self::default();
        match response {
            ContentsResponse::Many(entries) => {
                for entry in entries {
                    folder.push(entry);
                }
            }
            ContentsResponse::One(entry) => folder.push(entry),
        }
        folder
    }
}

/// A file name paired with its fully decoded text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContents {
    pub name: String,
    pub text: String,
}

impl FileContents {
    /// Decode a file entry's base64 content into text. Malformed base64 or
    /// non-UTF-8 bytes are hard errors.
    pub(crate) fn decode(entry: ContentsEntry) -> Result<Self> {
        let Some(content) = entry.content else {
            return Err(GithubError::MissingContent(entry.name));
        };
        match entry.encoding.as_deref() {
            Some("base64") => {}
            other => {
                return Err(GithubError::UnexpectedEncoding {
                    name: entry.name,
                    encoding: other.unwrap_or("<missing>").to_string(),
                })
            }
        }

        let cleaned: Vec<u8> = content
            .bytes()
            .filter(|byte| !byte.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(&cleaned)?;
        let text = String::from_utf8(bytes)?;

        Ok(Self {
            name: entry.name,
            text,
        })
    }
}
