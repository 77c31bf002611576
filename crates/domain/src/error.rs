//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations, enabling consistent
//! error handling without forcing callers to use String or anyhow. Note that
//! validation *findings* are not errors: the validators in
//! [`crate::validation`] report via structs and never fail. `DomainError` is
//! for operations that genuinely refuse or cannot proceed (content parsing,
//! XP spending, imports).

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (malformed JSON, unknown enum names)
    #[error("Parse error: {0}")]
    Parse(String),

    /// An XP spend was refused for lack of funds
    #[error("Insufficient {track} XP. Have {available}, need {needed}")]
    InsufficientXp {
        track: String,
        available: i64,
        needed: i64,
    },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// required fields empty, values outside allowed ranges, imports that
    /// do not describe a character at all.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string doesn't
    /// match any known variant, and for malformed JSON payloads.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an insufficient-XP error for a refused spend
    pub fn insufficient_xp(track: impl Into<String>, available: i64, needed: i64) -> Self {
        Self::InsufficientXp {
            track: track.into(),
            available,
            needed,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
