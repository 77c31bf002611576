//! Field and aggregate validators for candidate sheet data
//!
//! All validators are pure functions over untrusted `serde_json::Value`
//! slices. They never panic and never return errors as `Result`: findings
//! come back in report structs with human-readable messages, because a
//! candidate failing validation is an expected outcome, not a fault.
//!
//! Budget rules live in [`crate::rules`]; heritage base HP comes from an
//! injected [`GameContent`] table and is never hardcoded here.

use serde::Serialize;
use serde_json::Value;

use crate::coerce::integral;
use crate::content::GameContent;
use crate::rules::{
    coin_stat_budget, COIN_DOT_MAX, CREATION_SKILL_DOT_CAP, CREATION_SKILL_POINT_BUDGET,
    SKILL_DOT_MAX,
};
use crate::value_objects::CoinStat;

// ============================================================================
// Reports
// ============================================================================

/// Verdict of [`validate_skill_points`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPointsReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Total dots spent; present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
}

/// Verdict of [`validate_coin_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinStatsReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<i64>,
    /// The dynamic budget the total was checked against; present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<i64>,
}

/// Verdict of [`validate_heritage_hp`].
///
/// The HP ledger is reported on both success and failure so callers can
/// render the arithmetic either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageHpReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "totalHP")]
    pub total_hp: i64,
    #[serde(rename = "usedHP")]
    pub used_hp: i64,
    #[serde(rename = "remainingHP")]
    pub remaining_hp: i64,
}

/// Verdict of [`validate_xp_spending`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpSpendingReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
}

/// Verdict of [`validate_character`]: every subsystem failure, prefixed and
/// collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

// ============================================================================
// Field validators
// ============================================================================

/// Validate a candidate `skills` slice against the creation budget.
///
/// Checks, in order: the slice is an object, each category is an object,
/// each dot value is an integer in `[0, 4]`, no dot exceeds the creation
/// cap of 2, and the total stays within the 7-point budget. Unknown
/// category or skill names are held to the same rules rather than being
/// rejected by name.
pub fn validate_skill_points(skills: &Value) -> SkillPointsReport {
    let Some(categories) = skills.as_object() else {
        return SkillPointsReport {
            valid: false,
            error: Some("Skills must be an object".to_string()),
            total_points: None,
        };
    };

    let mut total_points: u32 = 0;
    for (category, category_skills) in categories {
        let Some(entries) = category_skills.as_object() else {
            return SkillPointsReport {
                valid: false,
                error: Some(format!("Skills category {} must be an object", category)),
                total_points: None,
            };
        };

        for (skill, points) in entries {
            let dots = match integral(points) {
                Some(dots) if (0..=i64::from(SKILL_DOT_MAX)).contains(&dots) => dots,
                _ => {
                    return SkillPointsReport {
                        valid: false,
                        error: Some(format!(
                            "Skill {} must be a number between 0-{}",
                            skill, SKILL_DOT_MAX
                        )),
                        total_points: None,
                    };
                }
            };

            if dots > i64::from(CREATION_SKILL_DOT_CAP) {
                return SkillPointsReport {
                    valid: false,
                    error: Some(format!(
                        "Skill {} cannot exceed {} points at creation",
                        skill, CREATION_SKILL_DOT_CAP
                    )),
                    total_points: None,
                };
            }

            total_points = total_points.saturating_add(dots as u32);
        }
    }

    if total_points > CREATION_SKILL_POINT_BUDGET {
        return SkillPointsReport {
            valid: false,
            error: Some(format!(
                "Total skill points ({}) cannot exceed {}",
                total_points, CREATION_SKILL_POINT_BUDGET
            )),
            total_points: None,
        };
    }

    SkillPointsReport {
        valid: true,
        error: None,
        total_points: Some(total_points),
    }
}

/// Validate a candidate `coinStats` slice against the dynamic budget.
///
/// All six stats must be present as integers in `[0, 5]` (extra keys are
/// ignored). The budget is base 10 plus one point per 10 playbook XP read
/// from `character_xp`.
pub fn validate_coin_stats(coin_stats: &Value, character_xp: Option<&Value>) -> CoinStatsReport {
    let Some(stats) = coin_stats.as_object() else {
        return CoinStatsReport {
            valid: false,
            error: Some("Coin stats must be an object".to_string()),
            total_points: None,
            max_points: None,
        };
    };

    let mut total_points: i64 = 0;
    for stat in CoinStat::ALL {
        let Some(value) = stats.get(stat.as_str()) else {
            return CoinStatsReport {
                valid: false,
                error: Some(format!("Missing coin stat: {}", stat)),
                total_points: None,
                max_points: None,
            };
        };

        let dots = match integral(value) {
            Some(dots) if (0..=i64::from(COIN_DOT_MAX)).contains(&dots) => dots,
            _ => {
                return CoinStatsReport {
                    valid: false,
                    error: Some(format!(
                        "Coin stat {} must be a number between 0-{}",
                        stat, COIN_DOT_MAX
                    )),
                    total_points: None,
                    max_points: None,
                };
            }
        };

        total_points += dots;
    }

    let playbook_xp = character_xp
        .and_then(|xp| xp.get("playbook"))
        .and_then(integral)
        .unwrap_or(0);
    let max_points = coin_stat_budget(playbook_xp);

    if total_points > max_points {
        return CoinStatsReport {
            valid: false,
            error: Some(format!(
                "Total coin points ({}) cannot exceed {}",
                total_points, max_points
            )),
            total_points: None,
            max_points: None,
        };
    }

    CoinStatsReport {
        valid: true,
        error: None,
        total_points: Some(total_points),
        max_points: Some(max_points),
    }
}

/// Validate the heritage HP ledger.
///
/// `total = base_hp + detriment HP + bonus HP from XP` must cover the
/// summed benefit costs. Base HP comes from the injected `heritage_data`
/// table; with no table (or an unknown heritage) it is 0, which is not
/// itself an error but usually surfaces as insufficient HP. Entries whose
/// amount is absent or non-numeric contribute 0; non-array slices count as
/// empty.
pub fn validate_heritage_hp(
    heritage: Option<&str>,
    selected_benefits: &Value,
    selected_detriments: &Value,
    bonus_hp_from_xp: i64,
    heritage_data: Option<&GameContent>,
) -> HeritageHpReport {
    let base_hp = heritage
        .zip(heritage_data)
        .and_then(|(name, content)| content.base_hp(name))
        .unwrap_or(0);

    let detriment_hp = sum_entry_amounts(selected_detriments, "hp");
    let benefit_cost = sum_entry_amounts(selected_benefits, "cost");

    let total_hp = base_hp
        .saturating_add(detriment_hp)
        .saturating_add(bonus_hp_from_xp);
    let used_hp = benefit_cost;
    let remaining_hp = total_hp.saturating_sub(used_hp);

    if remaining_hp < 0 {
        return HeritageHpReport {
            valid: false,
            error: Some(format!(
                "Insufficient HP. Have {}, need {}",
                total_hp, used_hp
            )),
            total_hp,
            used_hp,
            remaining_hp,
        };
    }

    HeritageHpReport {
        valid: true,
        error: None,
        total_hp,
        used_hp,
        remaining_hp,
    }
}

/// Sum the integer `key` field across an array of entries, skipping
/// anything that is not an entry with an integer amount.
fn sum_entry_amounts(entries: &Value, key: &str) -> i64 {
    entries
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get(key))
                .filter_map(integral)
                .fold(0i64, |acc, amount| acc.saturating_add(amount))
        })
        .unwrap_or(0)
}

/// Validate a prospective XP spend against a candidate `xp` slice.
///
/// `track` is looked up by name; unknown tracks and non-integer balances
/// read as 0 available. The only failure conditions are a non-object `xp`
/// slice and `available < amount` (so a non-positive amount always passes;
/// the arithmetic predates this codebase).
pub fn validate_xp_spending(current_xp: &Value, track: &str, amount: i64) -> XpSpendingReport {
    let Some(tracks) = current_xp.as_object() else {
        return XpSpendingReport {
            valid: false,
            error: Some("XP data must be an object".to_string()),
            available: None,
            remaining: None,
        };
    };

    let available = tracks.get(track).and_then(integral).unwrap_or(0);
    if available < amount {
        return XpSpendingReport {
            valid: false,
            error: Some(format!(
                "Insufficient {} XP. Have {}, need {}",
                track, available, amount
            )),
            available: None,
            remaining: None,
        };
    }

    XpSpendingReport {
        valid: true,
        error: None,
        available: Some(available),
        remaining: Some(available.saturating_sub(amount)),
    }
}

// ============================================================================
// Aggregate validator
// ============================================================================

/// Validate a whole candidate sheet without heritage content (base HP 0).
pub fn validate_character(candidate: &Value) -> CharacterReport {
    validate_character_inner(candidate, None)
}

/// Validate a whole candidate sheet with an injected content pack, so
/// heritage base HP participates in the ledger.
pub fn validate_character_with_content(
    candidate: &Value,
    content: &GameContent,
) -> CharacterReport {
    validate_character_inner(candidate, Some(content))
}

fn validate_character_inner(candidate: &Value, content: Option<&GameContent>) -> CharacterReport {
    if candidate.is_null() {
        return CharacterReport {
            valid: false,
            errors: vec!["Validation error: character data is null".to_string()],
        };
    }

    let mut errors = Vec::new();

    let skills = validate_skill_points(&candidate["skills"]);
    if let Some(error) = skills.error {
        errors.push(format!("Skills: {}", error));
    }

    let coin = validate_coin_stats(&candidate["coinStats"], Some(&candidate["xp"]));
    if let Some(error) = coin.error {
        errors.push(format!("Coin Stats: {}", error));
    }

    let heritage = validate_heritage_hp(
        candidate["heritage"].as_str(),
        &candidate["selectedBenefits"],
        &candidate["selectedDetriments"],
        integral(&candidate["bonusHPFromXP"]).unwrap_or(0),
        content,
    );
    if let Some(error) = heritage.error {
        errors.push(format!("Heritage HP: {}", error));
    }

    CharacterReport {
        valid: errors.is_empty(),
        errors,
    }
}

// ============================================================================
// Tests
// ============================================================================
