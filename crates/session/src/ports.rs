//! Ports for injecting time and storage.

use chrono::{DateTime, Utc};

use crate::error::StorageError;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Key-value storage the session persists sheets through.
///
/// Implementations return `Ok(None)` for a missing key. Every failure mode
/// (I/O, quota, poisoned locks) surfaces as a [`StorageError`]; the
/// [`crate::storage::SafeStore`] wrapper decides what survives one.
#[cfg_attr(test, mockall::automock)]
pub trait StoragePort: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
