//! Action skills - three categories of four rated actions each
//!
//! Skills are grouped under insight, prowess, and resolve. Each action holds
//! 0-4 dots; the creation budget (2 per action, 7 total) is enforced by the
//! validators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Insight actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightSkills {
    pub hunt: u8,
    pub study: u8,
    pub survey: u8,
    pub tinker: u8,
}

/// Prowess actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProwessSkills {
    pub finesse: u8,
    pub prowl: u8,
    pub skirmish: u8,
    pub wreck: u8,
}

/// Resolve actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveSkills {
    pub bizarre: u8,
    pub command: u8,
    pub consort: u8,
    pub sway: u8,
}

/// The full twelve-action skill grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillBlock {
    pub insight: InsightSkills,
    pub prowess: ProwessSkills,
    pub resolve: ResolveSkills,
}

impl SkillBlock {
    /// Read the dots for one action.
    #[inline]
    pub fn dot(&self, action: Action) -> u8 {
        match action {
            Action::Hunt => self.insight.hunt,
            Action::Study => self.insight.study,
            Action::Survey => self.insight.survey,
            Action::Tinker => self.insight.tinker,
            Action::Finesse => self.prowess.finesse,
            Action::Prowl => self.prowess.prowl,
            Action::Skirmish => self.prowess.skirmish,
            Action::Wreck => self.prowess.wreck,
            Action::Bizarre => self.resolve.bizarre,
            Action::Command => self.resolve.command,
            Action::Consort => self.resolve.consort,
            Action::Sway => self.resolve.sway,
        }
    }

    /// Mutable access to the dots for one action.
    #[inline]
    pub fn dot_mut(&mut self, action: Action) -> &mut u8 {
        match action {
            Action::Hunt => &mut self.insight.hunt,
            Action::Study => &mut self.insight.study,
            Action::Survey => &mut self.insight.survey,
            Action::Tinker => &mut self.insight.tinker,
            Action::Finesse => &mut self.prowess.finesse,
            Action::Prowl => &mut self.prowess.prowl,
            Action::Skirmish => &mut self.prowess.skirmish,
            Action::Wreck => &mut self.prowess.wreck,
            Action::Bizarre => &mut self.resolve.bizarre,
            Action::Command => &mut self.resolve.command,
            Action::Consort => &mut self.resolve.consort,
            Action::Sway => &mut self.resolve.sway,
        }
    }

    /// Sum of dots across all twelve actions.
    pub fn total_dots(&self) -> u32 {
        Action::ALL.iter().map(|&a| u32::from(self.dot(a))).sum()
    }

    /// Sum of dots within one category (the category's attribute rating
    /// would be the count of actions with at least one dot; this is the
    /// raw spend).
    pub fn category_dots(&self, category: SkillCategory) -> u32 {
        Action::ALL
            .iter()
            .filter(|a| a.category() == category)
            .map(|&a| u32::from(self.dot(a)))
            .sum()
    }
}

/// The three skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillCategory {
    Insight,
    Prowess,
    Resolve,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Insight,
        SkillCategory::Prowess,
        SkillCategory::Resolve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Insight => "insight",
            SkillCategory::Prowess => "prowess",
            SkillCategory::Resolve => "resolve",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insight" => Ok(Self::Insight),
            "prowess" => Ok(Self::Prowess),
            "resolve" => Ok(Self::Resolve),
            _ => Err(DomainError::parse(format!("Unknown skill category: {}", s))),
        }
    }
}

/// One of the twelve rated actions.
///
/// # Examples
///
/// ```
/// use standsheet_domain::value_objects::{Action, SkillCategory};
///
/// assert_eq!(Action::Bizarre.category(), SkillCategory::Resolve);
/// assert_eq!(Action::Bizarre.as_str(), "bizarre");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Hunt,
    Study,
    Survey,
    Tinker,
    Finesse,
    Prowl,
    Skirmish,
    Wreck,
    Bizarre,
    Command,
    Consort,
    Sway,
}

impl Action {
    /// All twelve actions in sheet order.
    pub const ALL: [Action; 12] = [
        Action::Hunt,
        Action::Study,
        Action::Survey,
        Action::Tinker,
        Action::Finesse,
        Action::Prowl,
        Action::Skirmish,
        Action::Wreck,
        Action::Bizarre,
        Action::Command,
        Action::Consort,
        Action::Sway,
    ];

    /// The category this action is rated under.
    pub fn category(self) -> SkillCategory {
        match self {
            Action::Hunt | Action::Study | Action::Survey | Action::Tinker => {
                SkillCategory::Insight
            }
            Action::Finesse | Action::Prowl | Action::Skirmish | Action::Wreck => {
                SkillCategory::Prowess
            }
            Action::Bizarre | Action::Command | Action::Consort | Action::Sway => {
                SkillCategory::Resolve
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Hunt => "hunt",
            Action::Study => "study",
            Action::Survey => "survey",
            Action::Tinker => "tinker",
            Action::Finesse => "finesse",
            Action::Prowl => "prowl",
            Action::Skirmish => "skirmish",
            Action::Wreck => "wreck",
            Action::Bizarre => "bizarre",
            Action::Command => "command",
            Action::Consort => "consort",
            Action::Sway => "sway",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Unknown action: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_empty() {
        let skills = SkillBlock::default();
        assert_eq!(skills.total_dots(), 0);
        for category in SkillCategory::ALL {
            assert_eq!(skills.category_dots(category), 0);
        }
    }

    #[test]
    fn dot_accessors_cover_every_action() {
        let mut skills = SkillBlock::default();
        for (i, action) in Action::ALL.iter().enumerate() {
            *skills.dot_mut(*action) = (i % 3) as u8;
        }
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(skills.dot(*action), (i % 3) as u8);
        }
    }

    #[test]
    fn category_dots_splits_the_grid() {
        let mut skills = SkillBlock::default();
        skills.insight.hunt = 2;
        skills.prowess.wreck = 1;
        skills.resolve.sway = 3;
        assert_eq!(skills.category_dots(SkillCategory::Insight), 2);
        assert_eq!(skills.category_dots(SkillCategory::Prowess), 1);
        assert_eq!(skills.category_dots(SkillCategory::Resolve), 3);
        assert_eq!(skills.total_dots(), 6);
    }

    #[test]
    fn actions_parse_from_wire_names() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("slide".parse::<Action>().is_err());
    }

    #[test]
    fn serializes_nested_camel_case() {
        let json = serde_json::to_value(SkillBlock::default()).unwrap();
        assert_eq!(json["insight"]["hunt"], 0);
        assert_eq!(json["prowess"]["finesse"], 0);
        assert_eq!(json["resolve"]["bizarre"], 0);
    }
}
