//! Character - the central sheet record
//!
//! A fully-typed snapshot of one character sheet. Every field has a zero or
//! empty default, so `Character::default()` is the canonical blank sheet
//! that recovery falls back to. Wire names are the sheet's legacy camelCase
//! keys; anything arriving from outside the process goes through
//! [`crate::sanitize::sanitize_character`] rather than straight
//! deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{
    CoinStats, HarmTrack, HeritageBenefit, HeritageDetriment, NamedEntry, SkillBlock, StressTrack,
    XpTracks,
};

/// One character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    // Identity & narrative
    pub true_name: String,
    pub alias: String,
    pub crew: String,
    pub look: String,
    /// Heritage name; a key into externally supplied heritage content.
    pub heritage: String,
    /// Playbook name; a key into externally supplied playbook content.
    pub playbook: String,
    pub vice: String,
    pub stand_name: String,

    // Stand profile
    pub coin_stats: CoinStats,

    // Action skills
    pub skills: SkillBlock,

    // Ability lists
    pub special_abilities: Vec<NamedEntry>,
    pub standard_abilities: Vec<NamedEntry>,
    pub playbook_abilities: Vec<NamedEntry>,
    pub custom_abilities: Vec<NamedEntry>,

    // Heritage economy
    pub selected_detriments: Vec<HeritageDetriment>,
    pub selected_benefits: Vec<HeritageBenefit>,
    /// Extra HP bought with XP (5 XP = 1 HP).
    #[serde(rename = "bonusHPFromXP")]
    pub bonus_hp_from_xp: u32,

    // Advancement
    pub xp: XpTracks,

    // Condition
    pub stress: StressTrack,
    pub trauma: Vec<String>,
    pub harm: HarmTrack,
    pub wanted: u8,

    // Relationships & gear
    pub friend: String,
    pub rival: String,
    pub description: String,
    pub equipment: Vec<NamedEntry>,
    pub background: String,
    pub notes: String,
}

impl Character {
    /// A blank sheet. Equivalent to `Character::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_true_name(mut self, name: impl Into<String>) -> Self {
        self.true_name = name.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_heritage(mut self, heritage: impl Into<String>) -> Self {
        self.heritage = heritage.into();
        self
    }

    pub fn with_playbook(mut self, playbook: impl Into<String>) -> Self {
        self.playbook = playbook.into();
        self
    }

    pub fn with_stand_name(mut self, stand_name: impl Into<String>) -> Self {
        self.stand_name = stand_name.into();
        self
    }

    /// Snapshot this sheet as a JSON value, the form consistency checking
    /// and validation operate on.
    ///
    /// Serializing an in-memory sheet cannot fail; the fallback exists only
    /// to keep this infallible in signature.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self {
            true_name: String::new(),
            alias: String::new(),
            crew: String::new(),
            look: String::new(),
            heritage: String::new(),
            playbook: String::new(),
            vice: String::new(),
            stand_name: String::new(),
            coin_stats: CoinStats::default(),
            skills: SkillBlock::default(),
            special_abilities: Vec::new(),
            standard_abilities: Vec::new(),
            playbook_abilities: Vec::new(),
            custom_abilities: Vec::new(),
            selected_detriments: Vec::new(),
            selected_benefits: Vec::new(),
            bonus_hp_from_xp: 0,
            xp: XpTracks::default(),
            stress: StressTrack::default(),
            trauma: Vec::new(),
            harm: HarmTrack::default(),
            wanted: 0,
            friend: String::new(),
            rival: String::new(),
            description: String::new(),
            equipment: Vec::new(),
            background: String::new(),
            notes: String::new(),
        }
    }
}
