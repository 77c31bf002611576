//! Debounced autosave bookkeeping
//!
//! Pure state machine for the session's save loop: edits mark the state
//! dirty, a quiet window coalesces bursts into one save, and the outcome
//! shows as a transient status. All methods take the current instant so the
//! caller's clock stays in charge.

use chrono::{DateTime, Duration, Utc};

/// Timing knobs for the autosave loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosavePolicy {
    /// Quiet time required after the last edit before a save fires.
    pub debounce: Duration,
    /// How long a successful save stays visible as [`SaveStatus::Saved`].
    pub saved_notice: Duration,
    /// How long a failed save stays visible as [`SaveStatus::Failed`].
    pub failed_notice: Duration,
}

impl Default for AutosavePolicy {
    fn default() -> Self {
        Self {
            debounce: Duration::milliseconds(1000),
            saved_notice: Duration::seconds(2),
            failed_notice: Duration::seconds(3),
        }
    }
}

/// Transient outcome of the most recent save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saved,
    Failed,
}

/// Debounce state for one autosaved document.
#[derive(Debug, Clone)]
pub struct AutosaveState {
    policy: AutosavePolicy,
    dirty_since: Option<DateTime<Utc>>,
    notice: Option<(SaveStatus, DateTime<Utc>)>,
}

impl AutosaveState {
    pub fn new(policy: AutosavePolicy) -> Self {
        Self {
            policy,
            dirty_since: None,
            notice: None,
        }
    }

    /// Records an edit, restarting the quiet window.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.dirty_since = Some(now);
    }

    /// True once the quiet window after the last edit has elapsed.
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        match self.dirty_since {
            Some(since) => now.signed_duration_since(since) >= self.policy.debounce,
            None => false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Marks the pending edits as persisted.
    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.dirty_since = None;
        self.notice = Some((SaveStatus::Saved, now + self.policy.saved_notice));
    }

    /// Marks the save attempt as failed; a later edit will retry.
    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.dirty_since = None;
        self.notice = Some((SaveStatus::Failed, now + self.policy.failed_notice));
    }

    /// Status to show right now; notices expire back to [`SaveStatus::Idle`].
    pub fn status(&self, now: DateTime<Utc>) -> SaveStatus {
        match self.notice {
            Some((status, until)) if now < until => status,
            _ => SaveStatus::Idle,
        }
    }
}

impl Default for AutosaveState {
    fn default() -> Self {
        Self::new(AutosavePolicy::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn at_ms(ms: i64) -> DateTime<Utc> {
        start() + Duration::milliseconds(ms)
    }

    #[test]
    fn clean_state_is_never_due() {
        let state = AutosaveState::default();
        assert!(!state.due(at_ms(10_000)));
        assert!(!state.is_dirty());
    }

    #[test]
    fn save_fires_after_the_quiet_window() {
        let mut state = AutosaveState::default();
        state.touch(start());

        assert!(!state.due(at_ms(999)));
        assert!(state.due(at_ms(1000)));
        assert!(state.due(at_ms(5000)));
    }

    #[test]
    fn another_edit_restarts_the_window() {
        let mut state = AutosaveState::default();
        state.touch(start());
        state.touch(at_ms(800));

        assert!(!state.due(at_ms(1000)));
        assert!(!state.due(at_ms(1799)));
        assert!(state.due(at_ms(1800)));
    }

    #[test]
    fn saved_notice_shows_for_two_seconds() {
        let mut state = AutosaveState::default();
        state.touch(start());
        state.mark_saved(at_ms(1000));

        assert!(!state.is_dirty());
        assert_eq!(state.status(at_ms(1000)), SaveStatus::Saved);
        assert_eq!(state.status(at_ms(2999)), SaveStatus::Saved);
        assert_eq!(state.status(at_ms(3000)), SaveStatus::Idle);
    }

    #[test]
    fn failed_notice_shows_for_three_seconds() {
        let mut state = AutosaveState::default();
        state.touch(start());
        state.mark_failed(at_ms(1000));

        assert_eq!(state.status(at_ms(1000)), SaveStatus::Failed);
        assert_eq!(state.status(at_ms(3999)), SaveStatus::Failed);
        assert_eq!(state.status(at_ms(4000)), SaveStatus::Idle);
    }

    #[test]
    fn a_new_edit_replaces_an_old_notice() {
        let mut state = AutosaveState::default();
        state.touch(start());
        state.mark_saved(at_ms(1000));

        state.touch(at_ms(1500));

        assert!(state.is_dirty());
        // The notice keeps showing until it expires on its own.
        assert_eq!(state.status(at_ms(1500)), SaveStatus::Saved);
        assert!(state.due(at_ms(2500)));
    }

    #[test]
    fn custom_policy_changes_the_window() {
        let mut state = AutosaveState::new(AutosavePolicy {
            debounce: Duration::milliseconds(250),
            ..Default::default()
        });
        state.touch(start());

        assert!(state.due(at_ms(250)));
    }
}
