//! Error types for the session layer
//!
//! Storage failures and workspace command refusals. Validation findings are
//! not errors here either: the consistency checker recovers instead of
//! failing, and the safe store falls back instead of propagating.

use thiserror::Error;

use crate::workspace::TabId;

/// A storage backend refused a read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure under a file-backed store
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The map file could not be encoded
    #[error("storage serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A workspace command could not be carried out.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The workspace has no active tab to apply the command to
    #[error("no active tab")]
    NoActiveTab,

    /// The tab id is not present in the workspace
    #[error("unknown tab: {0}")]
    UnknownTab(TabId),

    /// Closing the only remaining tab would discard its sheet
    #[error("cannot close the last tab")]
    LastTab,

    /// Imported or exported sheet text was not a JSON document
    #[error("malformed sheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] standsheet_domain::DomainError),
}
