use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The catalog feed could not be loaded. Always fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog '{}' could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog '{}' is not valid sitemap XML: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// One document could not be retrieved. Reported per URL, never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("transport failure fetching {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("http client could not be built: {0}")]
    Client(String),
}

/// Writing the final record failed. The record itself is still valid.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of a full lookup-and-extract invocation.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no interaction found between '{drug1}' and '{drug2}'")]
    NoMatch { drug1: String, drug2: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl LookupError {
    /// Process exit status for this failure; each class gets its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            LookupError::NoMatch { .. } => 1,
            LookupError::Catalog(_) => 2,
            LookupError::Fetch(_) => 3,
        }
    }
}

impl PersistError {
    pub fn exit_code(&self) -> i32 {
        4
    }
}
