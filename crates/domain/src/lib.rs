pub mod advancement;
pub mod character;
mod coerce;
pub mod content;
pub mod error;
pub mod rules;
pub mod sanitize;
pub mod validation;
pub mod value_objects;

pub use character::Character;
pub use content::{BenefitDef, DetrimentDef, GameContent, HeritageDef};
pub use error::DomainError;
pub use sanitize::sanitize_character;

// Re-export the validators and their reports (explicit list in validation.rs)
pub use validation::{
    validate_character, validate_character_with_content, validate_coin_stats,
    validate_heritage_hp, validate_skill_points, validate_xp_spending, CharacterReport,
    CoinStatsReport, HeritageHpReport, SkillPointsReport, XpSpendingReport,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    Action, CoinStat, CoinStats, EntryDetail, HarmTrack, HeritageBenefit, HeritageDetriment,
    InsightSkills, NamedEntry, ProwessSkills, ResolveSkills, SkillBlock, SkillCategory,
    StressTrack, XpTrack, XpTracks,
};

pub use advancement::{buy_bonus_hp, spend_xp_on_coin_stat, spend_xp_on_skill};
