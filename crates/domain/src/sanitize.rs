//! Whitelist sanitizer: arbitrary JSON in, a well-formed [`Character`] out.
//!
//! This is the recovery path for sheets that fail validation. Every
//! recognized field is copied over a default sheet when its value fits the
//! rule ranges; unknown keys and out-of-range values are dropped. Running
//! the sanitizer on its own output changes nothing.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::character::Character;
use crate::coerce;
use crate::rules::{COIN_DOT_MAX, SKILL_DOT_MAX, STRESS_BOXES, WANTED_MAX};
use crate::value_objects::{
    Action, CoinStat, EntryDetail, HeritageBenefit, HeritageDetriment, NamedEntry, StressTrack,
    XpTrack,
};

/// Builds a well-formed sheet from untrusted data. Total: any input,
/// including `null` or a scalar, yields a usable `Character`.
pub fn sanitize_character(candidate: &Value) -> Character {
    let Some(fields) = candidate.as_object() else {
        return Character::default();
    };

    let mut sheet = Character::default();

    // Free-text fields are copied only when they are already strings.
    copy_string(fields, "trueName", &mut sheet.true_name);
    copy_string(fields, "alias", &mut sheet.alias);
    copy_string(fields, "crew", &mut sheet.crew);
    copy_string(fields, "look", &mut sheet.look);
    copy_string(fields, "heritage", &mut sheet.heritage);
    copy_string(fields, "playbook", &mut sheet.playbook);
    copy_string(fields, "vice", &mut sheet.vice);
    copy_string(fields, "standName", &mut sheet.stand_name);
    copy_string(fields, "friend", &mut sheet.friend);
    copy_string(fields, "rival", &mut sheet.rival);
    copy_string(fields, "description", &mut sheet.description);
    copy_string(fields, "background", &mut sheet.background);
    copy_string(fields, "notes", &mut sheet.notes);

    if let Some(coin) = fields.get("coinStats") {
        for stat in CoinStat::ALL {
            if let Some(dots) = coin.get(stat.as_str()).and_then(coerce::integral) {
                if (0..=i64::from(COIN_DOT_MAX)).contains(&dots) {
                    *sheet.coin_stats.dot_mut(stat) = dots as u8;
                }
            }
        }
    }

    if let Some(skills) = fields.get("skills") {
        for action in Action::ALL {
            let dots = skills
                .get(action.category().as_str())
                .and_then(|category| category.get(action.as_str()))
                .and_then(coerce::integral);
            if let Some(dots) = dots {
                if (0..=i64::from(SKILL_DOT_MAX)).contains(&dots) {
                    *sheet.skills.dot_mut(action) = dots as u8;
                }
            }
        }
    }

    if let Some(items) = fields.get("specialAbilities").and_then(Value::as_array) {
        sheet.special_abilities = named_entries(items);
    }
    if let Some(items) = fields.get("standardAbilities").and_then(Value::as_array) {
        sheet.standard_abilities = named_entries(items);
    }
    if let Some(items) = fields.get("playbookAbilities").and_then(Value::as_array) {
        sheet.playbook_abilities = named_entries(items);
    }
    if let Some(items) = fields.get("customAbilities").and_then(Value::as_array) {
        sheet.custom_abilities = named_entries(items);
    }
    if let Some(items) = fields.get("equipment").and_then(Value::as_array) {
        sheet.equipment = named_entries(items);
    }

    if let Some(items) = fields.get("selectedBenefits").and_then(Value::as_array) {
        sheet.selected_benefits = items.iter().filter_map(benefit).collect();
    }
    if let Some(items) = fields.get("selectedDetriments").and_then(Value::as_array) {
        sheet.selected_detriments = items.iter().filter_map(detriment).collect();
    }
    if let Some(items) = fields.get("trauma").and_then(Value::as_array) {
        sheet.trauma = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    if let Some(xp) = fields.get("xp") {
        for track in XpTrack::ALL {
            if let Some(earned) = xp.get(track.as_str()).and_then(coerce::integral) {
                if earned >= 0 {
                    *sheet.xp.get_mut(track) = clamp_u32(earned.min(track.cap()));
                }
            }
        }
    }

    if let Some(boxes) = fields.get("stress").and_then(Value::as_array) {
        let marked: Vec<bool> = boxes.iter().take(STRESS_BOXES).map(coerce::truthy).collect();
        sheet.stress = StressTrack::from_slice(&marked);
    }

    if let Some(harm) = fields.get("harm").and_then(Value::as_object) {
        copy_string(harm, "level3", &mut sheet.harm.level3);
        copy_string(harm, "level2_0", &mut sheet.harm.level2_0);
        copy_string(harm, "level2_1", &mut sheet.harm.level2_1);
        copy_string(harm, "level1_0", &mut sheet.harm.level1_0);
        copy_string(harm, "level1_1", &mut sheet.harm.level1_1);
    }

    if let Some(level) = fields.get("wanted").and_then(coerce::integral) {
        if (0..=WANTED_MAX).contains(&level) {
            sheet.wanted = level as u8;
        } else if level > WANTED_MAX {
            sheet.wanted = WANTED_MAX as u8;
        }
    }

    if let Some(bonus) = fields.get("bonusHPFromXP").and_then(coerce::integral) {
        if bonus >= 0 {
            sheet.bonus_hp_from_xp = clamp_u32(bonus);
        }
    }

    sheet
}

fn copy_string(fields: &Map<String, Value>, key: &str, slot: &mut String) {
    if let Some(value) = fields.get(key).and_then(Value::as_str) {
        *slot = value.to_string();
    }
}

fn named_entries(items: &[Value]) -> Vec<NamedEntry> {
    items.iter().filter_map(named_entry).collect()
}

// Bare strings and records survive; nulls, numbers and other shapes are
// dropped. Record fields beyond the interpreted ones ride along untouched.
fn named_entry(item: &Value) -> Option<NamedEntry> {
    match item {
        Value::String(name) => Some(NamedEntry::Name(name.clone())),
        Value::Object(entry) => Some(NamedEntry::Detail(EntryDetail {
            name: text(entry, "name"),
            description: text(entry, "description"),
            extra: extra_fields(entry, &["name", "description"]),
        })),
        _ => None,
    }
}

fn benefit(item: &Value) -> Option<HeritageBenefit> {
    let entry = item.as_object()?;
    Some(HeritageBenefit {
        name: text(entry, "name"),
        cost: entry.get("cost").and_then(coerce::integral),
        description: owned_text(entry, "description"),
        required: entry.get("required").and_then(Value::as_bool),
        extra: extra_fields(entry, &["name", "cost", "description", "required"]),
    })
}

fn detriment(item: &Value) -> Option<HeritageDetriment> {
    let entry = item.as_object()?;
    Some(HeritageDetriment {
        name: text(entry, "name"),
        hp: entry.get("hp").and_then(coerce::integral),
        description: owned_text(entry, "description"),
        required: entry.get("required").and_then(Value::as_bool),
        extra: extra_fields(entry, &["name", "hp", "description", "required"]),
    })
}

// Keys the typed fields consume stay out of the carry-through map; a
// flattened duplicate would serialize the key twice.
fn extra_fields(entry: &Map<String, Value>, consumed: &[&str]) -> BTreeMap<String, Value> {
    entry
        .iter()
        .filter(|(key, _)| !consumed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn text(entry: &Map<String, Value>, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn owned_text(entry: &Map<String, Value>, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod hostile_input {
        use super::*;

        #[test]
        fn null_yields_the_default_sheet() {
            assert_eq!(sanitize_character(&Value::Null), Character::default());
        }

        #[test]
        fn scalars_and_arrays_yield_the_default_sheet() {
            assert_eq!(sanitize_character(&json!(42)), Character::default());
            assert_eq!(sanitize_character(&json!("sheet")), Character::default());
            assert_eq!(sanitize_character(&json!([1, 2, 3])), Character::default());
            assert_eq!(sanitize_character(&json!(true)), Character::default());
        }

        #[test]
        fn unknown_keys_are_dropped() {
            let sheet = sanitize_character(&json!({
                "coinStats": { "power": -1, "speed": 6, "invalidStat": 3 },
                "invalidField": "junk"
            }));

            assert_eq!(sheet, Character::default());
            let wire = sheet.to_value();
            assert!(wire.get("invalidField").is_none());
            assert!(wire["coinStats"].get("invalidStat").is_none());
        }
    }

    mod string_fields {
        use super::*;

        #[test]
        fn strings_are_copied_verbatim() {
            let sheet = sanitize_character(&json!({
                "trueName": "Jotaro",
                "alias": "JoJo",
                "standName": "Star Platinum"
            }));

            assert_eq!(sheet.true_name, "Jotaro");
            assert_eq!(sheet.alias, "JoJo");
            assert_eq!(sheet.stand_name, "Star Platinum");
        }

        #[test]
        fn non_string_values_keep_the_default() {
            let sheet = sanitize_character(&json!({
                "trueName": 42,
                "alias": null,
                "heritage": ["Human"],
                "notes": { "text": "nope" }
            }));

            assert_eq!(sheet.true_name, "");
            assert_eq!(sheet.alias, "");
            assert_eq!(sheet.heritage, "");
            assert_eq!(sheet.notes, "");
        }
    }

    mod coin_stats {
        use super::*;

        #[test]
        fn in_range_dots_are_kept() {
            let sheet = sanitize_character(&json!({
                "coinStats": { "power": 3, "durability": 5 }
            }));

            assert_eq!(sheet.coin_stats.power, 3);
            assert_eq!(sheet.coin_stats.durability, 5);
            assert_eq!(sheet.coin_stats.speed, 0);
        }

        #[test]
        fn out_of_range_and_fractional_dots_reset_to_zero() {
            let sheet = sanitize_character(&json!({
                "coinStats": { "power": -1, "speed": 6, "range": 2.5, "precision": "3" }
            }));

            assert_eq!(sheet.coin_stats, crate::value_objects::CoinStats::default());
        }

        #[test]
        fn non_object_block_keeps_defaults() {
            let sheet = sanitize_character(&json!({ "coinStats": [5, 5, 5] }));
            assert_eq!(sheet.coin_stats.total(), 0);
        }
    }

    mod skills {
        use super::*;

        #[test]
        fn canonical_actions_in_range_are_kept() {
            let sheet = sanitize_character(&json!({
                "skills": {
                    "insight": { "hunt": 3, "study": 4 },
                    "resolve": { "bizarre": 1 }
                }
            }));

            assert_eq!(sheet.skills.dot(Action::Hunt), 3);
            assert_eq!(sheet.skills.dot(Action::Study), 4);
            assert_eq!(sheet.skills.dot(Action::Bizarre), 1);
            assert_eq!(sheet.skills.dot(Action::Finesse), 0);
        }

        #[test]
        fn unknown_categories_and_actions_are_dropped() {
            let sheet = sanitize_character(&json!({
                "skills": {
                    "sorcery": { "hex": 4 },
                    "prowess": { "teleport": 2, "skirmish": 7 }
                }
            }));

            assert_eq!(sheet.skills.total_dots(), 0);
        }

        #[test]
        fn null_category_skips_only_that_category() {
            let sheet = sanitize_character(&json!({
                "skills": {
                    "insight": null,
                    "prowess": { "prowl": 2 }
                }
            }));

            assert_eq!(sheet.skills.dot(Action::Prowl), 2);
            assert_eq!(sheet.skills.category_dots(crate::value_objects::SkillCategory::Insight), 0);
        }
    }

    mod entry_lists {
        use super::*;

        #[test]
        fn strings_and_records_survive_while_junk_is_dropped() {
            let sheet = sanitize_character(&json!({
                "specialAbilities": [
                    "Ora Ora Barrage",
                    { "name": "Time Stop", "description": "Five seconds" },
                    null,
                    42,
                    [ "nested" ]
                ]
            }));

            assert_eq!(
                sheet.special_abilities,
                vec![
                    NamedEntry::Name("Ora Ora Barrage".to_string()),
                    NamedEntry::detailed("Time Stop", "Five seconds"),
                ]
            );
        }

        #[test]
        fn record_fields_beyond_name_and_description_survive() {
            let sheet = sanitize_character(&json!({
                "specialAbilities": [
                    { "id": 1700000000123_i64, "name": "Shadow", "type": "standard", "description": "" }
                ]
            }));

            let wire = sheet.to_value();
            assert_eq!(wire["specialAbilities"][0]["id"], 1700000000123_i64);
            assert_eq!(wire["specialAbilities"][0]["type"], "standard");
            assert_eq!(wire["specialAbilities"][0]["name"], "Shadow");
        }

        #[test]
        fn heritage_records_keep_uninterpreted_fields() {
            let sheet = sanitize_character(&json!({
                "selectedBenefits": [{ "name": "Tough", "cost": 3, "tier": 2 }],
                "selectedDetriments": [{ "name": "Frail", "hp": 1, "id": 4 }]
            }));

            assert_eq!(sheet.selected_benefits[0].extra["tier"], json!(2));
            assert_eq!(sheet.selected_detriments[0].extra["id"], json!(4));
        }

        #[test]
        fn equipment_lists_keep_their_length() {
            let items: Vec<Value> = (0..1000).map(|i| json!(format!("item-{i}"))).collect();
            let sheet = sanitize_character(&json!({ "equipment": items }));

            assert_eq!(sheet.equipment.len(), 1000);
            assert_eq!(sheet.equipment[999], NamedEntry::Name("item-999".to_string()));
        }

        #[test]
        fn benefit_records_parse_field_by_field() {
            let sheet = sanitize_character(&json!({
                "selectedBenefits": [
                    { "name": "Tough", "cost": 3 },
                    { "name": "Odd", "cost": null, "required": true },
                    "loose string",
                    { "name": "Sly", "cost": "2" }
                ]
            }));

            assert_eq!(sheet.selected_benefits.len(), 3);
            assert_eq!(sheet.selected_benefits[0].cost, Some(3));
            assert_eq!(sheet.selected_benefits[1].cost, None);
            assert_eq!(sheet.selected_benefits[1].required, Some(true));
            assert_eq!(sheet.selected_benefits[2].name, "Sly");
            assert_eq!(sheet.selected_benefits[2].cost, None);
        }

        #[test]
        fn detriment_records_keep_hp_refunds() {
            let sheet = sanitize_character(&json!({
                "selectedDetriments": [
                    { "name": "Sunlight Weakness", "hp": 2, "description": "Burns" },
                    7
                ]
            }));

            assert_eq!(sheet.selected_detriments.len(), 1);
            assert_eq!(sheet.selected_detriments[0].hp, Some(2));
            assert_eq!(
                sheet.selected_detriments[0].description.as_deref(),
                Some("Burns")
            );
        }

        #[test]
        fn trauma_keeps_only_strings() {
            let sheet = sanitize_character(&json!({
                "trauma": ["Cold", 42, null, "Haunted", {}]
            }));

            assert_eq!(sheet.trauma, vec!["Cold".to_string(), "Haunted".to_string()]);
        }
    }

    mod xp {
        use super::*;

        #[test]
        fn tracks_cap_at_their_limits() {
            let sheet = sanitize_character(&json!({
                "xp": { "insight": 75, "playbook": 150, "prowess": 12 }
            }));

            assert_eq!(sheet.xp.insight, 50);
            assert_eq!(sheet.xp.playbook, 100);
            assert_eq!(sheet.xp.prowess, 12);
        }

        #[test]
        fn negative_and_fractional_values_keep_zero() {
            let sheet = sanitize_character(&json!({
                "xp": { "insight": -5, "resolve": 2.5, "playbook": "10" }
            }));

            assert_eq!(sheet.xp, crate::value_objects::XpTracks::default());
        }
    }

    mod condition {
        use super::*;

        #[test]
        fn stress_coerces_truthiness_and_pads_to_twelve() {
            let sheet = sanitize_character(&json!({
                "stress": [true, false, "invalid", null, true]
            }));

            assert_eq!(
                sheet.stress,
                StressTrack::from_slice(&[true, false, true, false, true])
            );
            assert_eq!(sheet.stress.boxes().len(), STRESS_BOXES);
        }

        #[test]
        fn stress_longer_than_the_track_is_truncated() {
            let boxes: Vec<Value> = (0..20).map(|_| json!(1)).collect();
            let sheet = sanitize_character(&json!({ "stress": boxes }));

            assert_eq!(sheet.stress.marked_count(), STRESS_BOXES);
        }

        #[test]
        fn harm_copies_string_slots_only() {
            let sheet = sanitize_character(&json!({
                "harm": { "level3": "Broken arm", "level2_0": 42, "level1_1": "Bruised" }
            }));

            assert_eq!(sheet.harm.level3, "Broken arm");
            assert_eq!(sheet.harm.level2_0, "");
            assert_eq!(sheet.harm.level1_1, "Bruised");
        }

        #[test]
        fn wanted_clamps_to_the_cap() {
            assert_eq!(sanitize_character(&json!({ "wanted": 25 })).wanted, 20);
            assert_eq!(sanitize_character(&json!({ "wanted": 7 })).wanted, 7);
            assert_eq!(sanitize_character(&json!({ "wanted": -3 })).wanted, 0);
            assert_eq!(sanitize_character(&json!({ "wanted": 2.5 })).wanted, 0);
        }

        #[test]
        fn bonus_hp_keeps_non_negative_integers() {
            assert_eq!(
                sanitize_character(&json!({ "bonusHPFromXP": 4 })).bonus_hp_from_xp,
                4
            );
            assert_eq!(
                sanitize_character(&json!({ "bonusHPFromXP": -2 })).bonus_hp_from_xp,
                0
            );
        }
    }

    mod idempotence {
        use super::*;

        #[test]
        fn sanitizing_twice_equals_sanitizing_once() {
            let messy = json!({
                "trueName": "Giorno",
                "alias": 13,
                "coinStats": { "power": 4, "speed": 9 },
                "skills": { "insight": { "hunt": 2, "hex": 4 } },
                "specialAbilities": ["Gold Experience", { "id": 3, "name": "Zipper Man", "type": "custom" }, null],
                "selectedBenefits": [{ "name": "Tough", "cost": 3 }],
                "xp": { "playbook": 500 },
                "stress": [1, 0, "yes"],
                "wanted": 99,
                "extra": { "deep": true }
            });

            let once = sanitize_character(&messy);
            let twice = sanitize_character(&once.to_value());

            assert_eq!(once, twice);
        }

        #[test]
        fn well_formed_sheets_round_trip_unchanged() {
            let mut sheet = Character::new()
                .with_true_name("Jotaro Kujo")
                .with_heritage("Human")
                .with_playbook("Brute")
                .with_stand_name("Star Platinum");
            *sheet.skills.dot_mut(Action::Skirmish) = 2;
            *sheet.coin_stats.dot_mut(CoinStat::Power) = 4;
            sheet.xp.playbook = 30;
            sheet.stress.set(0, true);
            sheet.trauma.push("Cold".to_string());
            sheet.equipment.push(NamedEntry::Name("Hat".to_string()));
            sheet.selected_benefits.push(HeritageBenefit::new("Tough", 3));
            sheet.wanted = 4;
            sheet.bonus_hp_from_xp = 2;

            assert_eq!(sanitize_character(&sheet.to_value()), sheet);
        }
    }
}
