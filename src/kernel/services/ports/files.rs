//! Remote file storage contract.
//!
//! The storage collaborator owns the authoritative copy of every file; the
//! session never assumes persistence until an update acknowledges.

use compact_str::CompactString;

use super::runtime::PortFuture;

/// Listing or reading a remote file failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Unreachable(String),
    NotFound(CompactString),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unreachable(msg) => write!(f, "Storage unreachable: {}", msg),
            FetchError::NotFound(name) => write!(f, "No such file: {}", name),
        }
    }
}

impl std::error::Error for FetchError {}

/// Creating, updating, or deleting a remote file failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    Unreachable(String),
    Rejected(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Unreachable(msg) => write!(f, "Storage unreachable: {}", msg),
            PersistError::Rejected(msg) => write!(f, "Storage rejected the operation: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {}

pub trait FileStore: Send + Sync {
    fn list(&self) -> PortFuture<Result<Vec<CompactString>, FetchError>>;

    fn fetch(&self, filename: &str) -> PortFuture<Result<String, FetchError>>;

    fn create(&self, filename: &str, content: &str) -> PortFuture<Result<(), PersistError>>;

    fn update(&self, filename: &str, content: &str) -> PortFuture<Result<(), PersistError>>;

    /// Idempotent from the caller's view.
    fn remove(&self, filename: &str) -> PortFuture<Result<(), PersistError>>;
}
