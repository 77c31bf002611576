//! Post-creation advancement: spending earned XP on permanent improvements.
//!
//! Pricing follows the advancement table in [`crate::rules`]: a skill dot
//! costs 5 XP from the matching ability track, a coin-stat dot 10 playbook
//! XP, and each bonus heritage HP 5 playbook XP. Every operation either
//! applies fully or refuses with the sheet untouched.

use crate::character::Character;
use crate::error::DomainError;
use crate::rules::{
    COIN_ADVANCE_XP_COST, COIN_DOT_MAX, SKILL_ADVANCE_XP_COST, SKILL_DOT_MAX, XP_PER_BONUS_HP,
};
use crate::value_objects::{Action, CoinStat, SkillCategory, XpTrack};

/// Buys one dot in `action`, paying from the track of its category.
pub fn spend_xp_on_skill(sheet: &mut Character, action: Action) -> Result<(), DomainError> {
    let dots = sheet.skills.dot(action);
    if dots >= SKILL_DOT_MAX {
        return Err(DomainError::constraint(format!(
            "Skill {} is already at {} dots",
            action.as_str(),
            SKILL_DOT_MAX
        )));
    }
    let track = xp_track_for(action.category());
    sheet.xp.try_spend(track, SKILL_ADVANCE_XP_COST as u32)?;
    *sheet.skills.dot_mut(action) = dots + 1;
    Ok(())
}

/// Buys one dot in `stat`, paying from the playbook track.
pub fn spend_xp_on_coin_stat(sheet: &mut Character, stat: CoinStat) -> Result<(), DomainError> {
    let dots = sheet.coin_stats.dot(stat);
    if dots >= COIN_DOT_MAX {
        return Err(DomainError::constraint(format!(
            "Coin stat {} is already at {} dots",
            stat.as_str(),
            COIN_DOT_MAX
        )));
    }
    sheet.xp.try_spend(XpTrack::Playbook, COIN_ADVANCE_XP_COST as u32)?;
    *sheet.coin_stats.dot_mut(stat) = dots + 1;
    Ok(())
}

/// Buys one bonus heritage HP with playbook XP.
pub fn buy_bonus_hp(sheet: &mut Character) -> Result<(), DomainError> {
    sheet.xp.try_spend(XpTrack::Playbook, XP_PER_BONUS_HP as u32)?;
    sheet.bonus_hp_from_xp = sheet.bonus_hp_from_xp.saturating_add(1);
    Ok(())
}

fn xp_track_for(category: SkillCategory) -> XpTrack {
    match category {
        SkillCategory::Insight => XpTrack::Insight,
        SkillCategory::Prowess => XpTrack::Prowess,
        SkillCategory::Resolve => XpTrack::Resolve,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_xp(insight: u32, playbook: u32) -> Character {
        let mut sheet = Character::new();
        sheet.xp.insight = insight;
        sheet.xp.playbook = playbook;
        sheet
    }

    mod skills {
        use super::*;

        #[test]
        fn buys_a_dot_from_the_matching_track() {
            let mut sheet = sheet_with_xp(12, 0);

            spend_xp_on_skill(&mut sheet, Action::Hunt).unwrap();

            assert_eq!(sheet.skills.dot(Action::Hunt), 1);
            assert_eq!(sheet.xp.insight, 7);
        }

        #[test]
        fn resolve_actions_charge_the_resolve_track() {
            let mut sheet = sheet_with_xp(0, 0);
            sheet.xp.resolve = 5;

            spend_xp_on_skill(&mut sheet, Action::Bizarre).unwrap();

            assert_eq!(sheet.skills.dot(Action::Bizarre), 1);
            assert_eq!(sheet.xp.resolve, 0);
            assert_eq!(sheet.xp.insight, 0);
        }

        #[test]
        fn refuses_without_funds_and_leaves_the_sheet_alone() {
            let mut sheet = sheet_with_xp(3, 0);

            let err = spend_xp_on_skill(&mut sheet, Action::Study).unwrap_err();

            assert_eq!(err.to_string(), "Insufficient insight XP. Have 3, need 5");
            assert_eq!(sheet.skills.dot(Action::Study), 0);
            assert_eq!(sheet.xp.insight, 3);
        }

        #[test]
        fn refuses_at_the_dot_ceiling_without_charging() {
            let mut sheet = sheet_with_xp(20, 0);
            *sheet.skills.dot_mut(Action::Hunt) = SKILL_DOT_MAX;

            let err = spend_xp_on_skill(&mut sheet, Action::Hunt).unwrap_err();

            assert!(matches!(err, DomainError::Constraint(_)));
            assert_eq!(sheet.xp.insight, 20);
        }
    }

    mod coin_stats {
        use super::*;

        #[test]
        fn buys_a_dot_with_playbook_xp() {
            let mut sheet = sheet_with_xp(0, 25);

            spend_xp_on_coin_stat(&mut sheet, CoinStat::Power).unwrap();

            assert_eq!(sheet.coin_stats.power, 1);
            assert_eq!(sheet.xp.playbook, 15);
        }

        #[test]
        fn refuses_at_five_dots() {
            let mut sheet = sheet_with_xp(0, 50);
            *sheet.coin_stats.dot_mut(CoinStat::Speed) = COIN_DOT_MAX;

            let err = spend_xp_on_coin_stat(&mut sheet, CoinStat::Speed).unwrap_err();

            assert!(matches!(err, DomainError::Constraint(_)));
            assert_eq!(sheet.coin_stats.speed, COIN_DOT_MAX);
            assert_eq!(sheet.xp.playbook, 50);
        }

        #[test]
        fn refuses_with_insufficient_playbook_xp() {
            let mut sheet = sheet_with_xp(0, 9);

            let err = spend_xp_on_coin_stat(&mut sheet, CoinStat::Range).unwrap_err();

            assert_eq!(err.to_string(), "Insufficient playbook XP. Have 9, need 10");
            assert_eq!(sheet.coin_stats.range, 0);
        }
    }

    mod bonus_hp {
        use super::*;

        #[test]
        fn five_xp_buys_one_hp() {
            let mut sheet = sheet_with_xp(0, 12);

            buy_bonus_hp(&mut sheet).unwrap();
            buy_bonus_hp(&mut sheet).unwrap();

            assert_eq!(sheet.bonus_hp_from_xp, 2);
            assert_eq!(sheet.xp.playbook, 2);
        }

        #[test]
        fn refuses_below_the_price() {
            let mut sheet = sheet_with_xp(0, 4);

            let err = buy_bonus_hp(&mut sheet).unwrap_err();

            assert_eq!(err.to_string(), "Insufficient playbook XP. Have 4, need 5");
            assert_eq!(sheet.bonus_hp_from_xp, 0);
            assert_eq!(sheet.xp.playbook, 4);
        }
    }
}
