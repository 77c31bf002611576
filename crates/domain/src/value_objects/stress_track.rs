//! Stress track - a fixed row of twelve boolean boxes

use serde::{Deserialize, Serialize};

use crate::rules::STRESS_BOXES;

/// Exactly twelve stress boxes, marked or clear.
///
/// The fixed length is the invariant this type exists for: arbitrary input
/// arrays are truncated, coerced, and padded back to twelve by the
/// sanitizer, and nothing in the domain can change the length afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StressTrack([bool; STRESS_BOXES]);

impl StressTrack {
    /// All boxes clear.
    pub fn new() -> Self {
        Self([false; STRESS_BOXES])
    }

    /// Build from an arbitrary-length slice: truncate to twelve, pad with
    /// clear boxes.
    pub fn from_slice(values: &[bool]) -> Self {
        let mut boxes = [false; STRESS_BOXES];
        for (slot, &value) in boxes.iter_mut().zip(values.iter()) {
            *slot = value;
        }
        Self(boxes)
    }

    /// The raw boxes.
    #[inline]
    pub fn boxes(&self) -> &[bool; STRESS_BOXES] {
        &self.0
    }

    /// Whether box `index` is marked; out-of-range reads as clear.
    pub fn is_marked(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Mark or clear box `index`; out-of-range is ignored.
    pub fn set(&mut self, index: usize, marked: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = marked;
        }
    }

    /// Number of marked boxes.
    pub fn marked_count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }
}

impl Default for StressTrack {
    fn default() -> Self {
        Self::new()
    }
}
