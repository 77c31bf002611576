//! Budget and pricing constants for the sheet's point-buy economy
//!
//! Every numeric rule the validators and sanitizer enforce lives here as a
//! named constant so the numbers appear exactly once.

/// Per-skill dot ceiling.
pub const SKILL_DOT_MAX: u8 = 4;

/// Per-skill dot ceiling at character creation.
pub const CREATION_SKILL_DOT_CAP: u8 = 2;

/// Total skill dots allowed at character creation.
pub const CREATION_SKILL_POINT_BUDGET: u32 = 7;

/// Per-coin-stat dot ceiling.
pub const COIN_DOT_MAX: u8 = 5;

/// Coin-stat dot budget before playbook-XP bonuses.
pub const COIN_BASE_BUDGET: i64 = 10;

/// Playbook XP needed per extra coin-stat point.
pub const PLAYBOOK_XP_PER_COIN_POINT: i64 = 10;

/// Length of the stress track.
pub const STRESS_BOXES: usize = 12;

/// Wanted-level ceiling applied on sanitize.
pub const WANTED_MAX: i64 = 20;

/// Sanitizer cap for the insight/prowess/resolve XP tracks.
pub const ABILITY_XP_CAP: i64 = 50;

/// Sanitizer cap for the playbook XP track.
pub const PLAYBOOK_XP_CAP: i64 = 100;

/// XP price of one skill dot (post-creation advancement).
pub const SKILL_ADVANCE_XP_COST: i64 = 5;

/// XP price of one coin-stat dot (post-creation advancement).
pub const COIN_ADVANCE_XP_COST: i64 = 10;

/// XP price of one bonus heritage HP (5 XP = 1 HP).
pub const XP_PER_BONUS_HP: i64 = 5;

/// Coin-stat budget for a given amount of accumulated playbook XP.
///
/// Base 10 plus one point per 10 playbook XP. Uses floor division so a
/// (corrupt) negative XP value lowers the budget rather than rounding
/// toward it.
#[inline]
pub fn coin_stat_budget(playbook_xp: i64) -> i64 {
    COIN_BASE_BUDGET + playbook_xp.div_euclid(PLAYBOOK_XP_PER_COIN_POINT)
}
