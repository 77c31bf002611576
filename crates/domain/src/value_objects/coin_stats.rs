//! Coin stats - the six-dot power profile of a character's stand

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The six fixed coin stats, each rated 0-5 dots.
///
/// The sum across all six is limited by a dynamic budget (base 10, plus one
/// point per 10 playbook XP); that budget is enforced by the validators, not
/// by this struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinStats {
    pub power: u8,
    pub speed: u8,
    pub range: u8,
    pub durability: u8,
    pub precision: u8,
    pub development: u8,
}

impl CoinStats {
    /// Sum of all six stats.
    pub fn total(&self) -> u32 {
        [
            self.power,
            self.speed,
            self.range,
            self.durability,
            self.precision,
            self.development,
        ]
        .iter()
        .map(|&d| u32::from(d))
        .sum()
    }

    /// Read one stat by name.
    #[inline]
    pub fn dot(&self, stat: CoinStat) -> u8 {
        match stat {
            CoinStat::Power => self.power,
            CoinStat::Speed => self.speed,
            CoinStat::Range => self.range,
            CoinStat::Durability => self.durability,
            CoinStat::Precision => self.precision,
            CoinStat::Development => self.development,
        }
    }

    /// Mutable access to one stat by name.
    #[inline]
    pub fn dot_mut(&mut self, stat: CoinStat) -> &mut u8 {
        match stat {
            CoinStat::Power => &mut self.power,
            CoinStat::Speed => &mut self.speed,
            CoinStat::Range => &mut self.range,
            CoinStat::Durability => &mut self.durability,
            CoinStat::Precision => &mut self.precision,
            CoinStat::Development => &mut self.development,
        }
    }
}

/// Name of one coin stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoinStat {
    Power,
    Speed,
    Range,
    Durability,
    Precision,
    Development,
}

impl CoinStat {
    /// All six stats in canonical sheet order.
    pub const ALL: [CoinStat; 6] = [
        CoinStat::Power,
        CoinStat::Speed,
        CoinStat::Range,
        CoinStat::Durability,
        CoinStat::Precision,
        CoinStat::Development,
    ];

    /// Wire/display name (matches the sheet's JSON keys).
    pub fn as_str(self) -> &'static str {
        match self {
            CoinStat::Power => "power",
            CoinStat::Speed => "speed",
            CoinStat::Range => "range",
            CoinStat::Durability => "durability",
            CoinStat::Precision => "precision",
            CoinStat::Development => "development",
        }
    }
}

impl fmt::Display for CoinStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinStat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(Self::Power),
            "speed" => Ok(Self::Speed),
            "range" => Ok(Self::Range),
            "durability" => Ok(Self::Durability),
            "precision" => Ok(Self::Precision),
            "development" => Ok(Self::Development),
            _ => Err(DomainError::parse(format!("Unknown coin stat: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let stats = CoinStats::default();
        assert_eq!(stats.total(), 0);
        for stat in CoinStat::ALL {
            assert_eq!(stats.dot(stat), 0);
        }
    }

    #[test]
    fn total_sums_all_six() {
        let mut stats = CoinStats::default();
        *stats.dot_mut(CoinStat::Power) = 3;
        *stats.dot_mut(CoinStat::Development) = 2;
        assert_eq!(stats.total(), 5);
    }

    #[test]
    fn round_trips_through_canonical_names() {
        for stat in CoinStat::ALL {
            assert_eq!(stat.as_str().parse::<CoinStat>().unwrap(), stat);
        }
        assert!("luck".parse::<CoinStat>().is_err());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(CoinStats::default()).unwrap();
        for stat in CoinStat::ALL {
            assert_eq!(json[stat.as_str()], 0);
        }
    }
}
