//! Self-healing state tracking for sheet updates
//!
//! [`StateConsistencyChecker`] sits between raw edits and the state the rest
//! of the session trusts. Valid updates pass through and are remembered;
//! invalid ones roll back to the last good sheet; a burst of consecutive
//! failures, or a failure with nothing to roll back to, repairs the
//! candidate through the sanitizer instead.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use standsheet_domain::{
    sanitize_character, validate_character, validate_character_with_content, Character,
    GameContent,
};

/// Consecutive invalid updates tolerated before rollback gives way to repair.
pub const DEFAULT_REPAIR_THRESHOLD: u32 = 3;

/// Counters exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerStats {
    pub update_count: u64,
    pub error_count: u32,
    pub has_valid_state: bool,
}

/// Screens every sheet update and guarantees a well-formed result.
#[derive(Debug)]
pub struct StateConsistencyChecker {
    last_valid: Option<Character>,
    update_count: u64,
    error_count: u32,
    repair_threshold: u32,
    content: Option<Arc<GameContent>>,
}

impl StateConsistencyChecker {
    pub fn new() -> Self {
        Self {
            last_valid: None,
            update_count: 0,
            error_count: 0,
            repair_threshold: DEFAULT_REPAIR_THRESHOLD,
            content: None,
        }
    }

    /// Overrides how many consecutive failures rollback absorbs before a
    /// repair is forced.
    pub fn with_repair_threshold(mut self, threshold: u32) -> Self {
        self.repair_threshold = threshold;
        self
    }

    /// Validates heritage HP against a content pack instead of base 0.
    pub fn with_content(mut self, content: Arc<GameContent>) -> Self {
        self.content = Some(content);
        self
    }

    /// Screens one update and returns the state the session should hold.
    ///
    /// Never panics; every arm produces a well-formed [`Character`].
    pub fn check(&mut self, candidate: &Value) -> Character {
        self.update_count += 1;

        let report = match &self.content {
            Some(content) => validate_character_with_content(candidate, content),
            None => validate_character(candidate),
        };

        if report.valid {
            return match serde_json::from_value::<Character>(candidate.clone()) {
                Ok(sheet) => {
                    self.last_valid = Some(sheet.clone());
                    self.error_count = 0;
                    sheet
                }
                // The validators only read rule fields; junk elsewhere can
                // still break the decode. Fall back without touching the
                // counters, exactly like any other internal failure.
                Err(err) => {
                    tracing::error!("State consistency check error: {}", err);
                    self.last_valid
                        .clone()
                        .unwrap_or_else(|| sanitize_character(candidate))
                }
            };
        }

        self.error_count += 1;
        tracing::warn!("State consistency check failed: {:?}", report.errors);

        if self.error_count <= self.repair_threshold {
            if let Some(last) = &self.last_valid {
                return last.clone();
            }
        }

        let repaired = sanitize_character(candidate);
        self.last_valid = Some(repaired.clone());
        self.error_count = 0;
        repaired
    }

    /// Last sheet that passed validation (or was installed by a repair).
    pub fn last_valid_state(&self) -> Option<&Character> {
        self.last_valid.as_ref()
    }

    pub fn stats(&self) -> CheckerStats {
        CheckerStats {
            update_count: self.update_count,
            error_count: self.error_count,
            has_valid_state: self.last_valid.is_some(),
        }
    }

    /// Forgets all history, as if freshly constructed.
    pub fn reset(&mut self) {
        self.last_valid = None;
        self.update_count = 0;
        self.error_count = 0;
    }
}

impl Default for StateConsistencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
