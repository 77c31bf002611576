//! Externally supplied game-content tables
//!
//! The domain holds no game data of its own: heritage base HP, benefit and
//! detriment catalogs, trauma conditions, and vice options are campaign
//! content loaded from JSON (typically fetched from a content service or
//! bundled file) and injected into the validators. An empty table is always
//! legal; validators degrade to a base HP of 0 rather than failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomainError;

/// One heritage's definition: base HP plus its benefit/detriment catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeritageDef {
    #[serde(rename = "baseHP")]
    pub base_hp: i64,
    pub description: String,
    pub benefits: Vec<BenefitDef>,
    pub detriments: Vec<DetrimentDef>,
}

/// A purchasable heritage benefit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenefitDef {
    pub name: String,
    pub cost: i64,
    pub required: bool,
    pub description: String,
}

/// A heritage detriment that grants HP when taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetrimentDef {
    pub name: String,
    pub hp: i64,
    pub required: bool,
    pub description: String,
}

/// The full injected content pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameContent {
    heritages: BTreeMap<String, HeritageDef>,
    trauma_conditions: Vec<String>,
    vices: Vec<String>,
}

impl GameContent {
    /// An empty pack (no heritages, no option lists).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a content pack from JSON.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let content = serde_json::from_str(json)?;
        Ok(content)
    }

    // Builder-style setup, mostly for tests and bundled defaults.

    pub fn with_heritage(mut self, name: impl Into<String>, def: HeritageDef) -> Self {
        self.heritages.insert(name.into(), def);
        self
    }

    pub fn with_trauma_conditions(mut self, conditions: Vec<String>) -> Self {
        self.trauma_conditions = conditions;
        self
    }

    pub fn with_vices(mut self, vices: Vec<String>) -> Self {
        self.vices = vices;
        self
    }

    /// Look up one heritage definition.
    pub fn heritage(&self, name: &str) -> Option<&HeritageDef> {
        self.heritages.get(name)
    }

    /// Base HP for a heritage, if the pack knows it.
    pub fn base_hp(&self, name: &str) -> Option<i64> {
        self.heritages.get(name).map(|def| def.base_hp)
    }

    pub fn heritage_names(&self) -> impl Iterator<Item = &str> {
        self.heritages.keys().map(String::as_str)
    }

    pub fn trauma_conditions(&self) -> &[String] {
        &self.trauma_conditions
    }

    pub fn vices(&self) -> &[String] {
        &self.vices
    }
}
