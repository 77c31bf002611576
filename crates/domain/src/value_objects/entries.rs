//! Loose list entries carried on the sheet
//!
//! Ability and equipment lists accept either bare name strings or
//! `{name, description}` records; heritage selections are records whose
//! numeric amounts may be absent (an absent amount contributes nothing to
//! the HP ledger). All of these tolerate partial data because they arrive
//! from imports and old saves, not from validated forms. Record fields
//! beyond the ones named here (app-assigned ids, ability categories) ride
//! along untouched so they survive a save/load round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in an ability or equipment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamedEntry {
    /// A bare name, e.g. `"Iron Will"`.
    Name(String),
    /// A record with a name and descriptive text.
    Detail(EntryDetail),
}

impl NamedEntry {
    /// Convenience constructor for a detailed entry.
    pub fn detailed(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Detail(EntryDetail {
            name: name.into(),
            description: description.into(),
            extra: BTreeMap::new(),
        })
    }

    /// The entry's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detail(detail) => &detail.name,
        }
    }
}

impl From<&str> for NamedEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// The record form of a [`NamedEntry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDetail {
    pub name: String,
    pub description: String,
    /// Uninterpreted fields (ids, categories) carried through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A heritage benefit the player has taken, spending HP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeritageBenefit {
    pub name: String,
    /// HP cost; `None` (absent or non-numeric in the source data) costs 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Uninterpreted fields carried through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl HeritageBenefit {
    pub fn new(name: impl Into<String>, cost: i64) -> Self {
        Self {
            name: name.into(),
            cost: Some(cost),
            description: None,
            required: None,
            extra: BTreeMap::new(),
        }
    }

    /// The cost this entry actually charges.
    #[inline]
    pub fn cost_or_zero(&self) -> i64 {
        self.cost.unwrap_or(0)
    }
}

/// A heritage detriment the player has taken, granting HP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeritageDetriment {
    pub name: String,
    /// HP granted; `None` (absent or non-numeric in the source data) grants 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Uninterpreted fields carried through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl HeritageDetriment {
    pub fn new(name: impl Into<String>, hp: i64) -> Self {
        Self {
            name: name.into(),
            hp: Some(hp),
            description: None,
            required: None,
            extra: BTreeMap::new(),
        }
    }

    /// The HP this entry actually grants.
    #[inline]
    pub fn hp_or_zero(&self) -> i64 {
        self.hp.unwrap_or(0)
    }
}
