//! Harm track - five fixed free-text injury slots

use serde::{Deserialize, Serialize};

/// The sheet's five harm slots: one level-3, two level-2, two level-1.
///
/// Field names double as the wire keys (`level2_0` and friends predate this
/// codebase), so no case conversion is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmTrack {
    pub level3: String,
    pub level2_0: String,
    pub level2_1: String,
    pub level1_0: String,
    pub level1_1: String,
}

impl HarmTrack {
    /// True when every slot is blank.
    pub fn is_clear(&self) -> bool {
        self.level3.is_empty()
            && self.level2_0.is_empty()
            && self.level2_1.is_empty()
            && self.level1_0.is_empty()
            && self.level1_1.is_empty()
    }
}
