//! # Repofind GitHub Access
//!
//! Thin client for the GitHub contents API: one level of directory listing
//! and single-file reads with base64 decoding. Single-attempt semantics
//! throughout; a non-success response is logged and surfaces to the caller
//! as `None`, while transport and decoding failures are hard errors.
//!
//! No state is shared across calls and nothing is cached: each listing or
//! read is rebuilt fresh from the remote response.

mod client;
mod error;
mod repo;
mod types;

pub use client::GithubClient;
pub use error::{GithubError, Result};
pub use repo::RepoRef;
pub use types::{ContentsEntry, ContentsResponse, EntryKind, FileContents, FolderContents};
