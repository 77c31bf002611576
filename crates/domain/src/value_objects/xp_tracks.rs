//! Experience tracks and typed XP spending

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::rules::{ABILITY_XP_CAP, PLAYBOOK_XP_CAP};

/// Accumulated XP per track.
///
/// The three ability tracks cap at 50 and the playbook track at 100 when
/// data passes through the sanitizer; values mutated in-process are trusted
/// and only spent through [`XpTracks::try_spend`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XpTracks {
    pub insight: u32,
    pub prowess: u32,
    pub resolve: u32,
    pub playbook: u32,
}

impl XpTracks {
    /// Read one track.
    #[inline]
    pub fn get(&self, track: XpTrack) -> u32 {
        match track {
            XpTrack::Insight => self.insight,
            XpTrack::Prowess => self.prowess,
            XpTrack::Resolve => self.resolve,
            XpTrack::Playbook => self.playbook,
        }
    }

    /// Mutable access to one track.
    #[inline]
    pub fn get_mut(&mut self, track: XpTrack) -> &mut u32 {
        match track {
            XpTrack::Insight => &mut self.insight,
            XpTrack::Prowess => &mut self.prowess,
            XpTrack::Resolve => &mut self.resolve,
            XpTrack::Playbook => &mut self.playbook,
        }
    }

    /// Deduct `amount` XP from `track`, returning the remaining balance.
    ///
    /// Refuses without mutating when the track cannot cover the spend.
    pub fn try_spend(&mut self, track: XpTrack, amount: u32) -> Result<u32, DomainError> {
        let available = self.get(track);
        if available < amount {
            return Err(DomainError::insufficient_xp(
                track.as_str(),
                i64::from(available),
                i64::from(amount),
            ));
        }
        let remaining = available - amount;
        *self.get_mut(track) = remaining;
        Ok(remaining)
    }
}

/// Name of one XP track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XpTrack {
    Insight,
    Prowess,
    Resolve,
    Playbook,
}

impl XpTrack {
    pub const ALL: [XpTrack; 4] = [
        XpTrack::Insight,
        XpTrack::Prowess,
        XpTrack::Resolve,
        XpTrack::Playbook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            XpTrack::Insight => "insight",
            XpTrack::Prowess => "prowess",
            XpTrack::Resolve => "resolve",
            XpTrack::Playbook => "playbook",
        }
    }

    /// Sanitizer ceiling for this track.
    pub fn cap(self) -> i64 {
        match self {
            XpTrack::Playbook => PLAYBOOK_XP_CAP,
            _ => ABILITY_XP_CAP,
        }
    }
}

impl fmt::Display for XpTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XpTrack {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insight" => Ok(Self::Insight),
            "prowess" => Ok(Self::Prowess),
            "resolve" => Ok(Self::Resolve),
            "playbook" => Ok(Self::Playbook),
            _ => Err(DomainError::parse(format!("Unknown XP track: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_deducts_and_reports_remaining() {
        let mut xp = XpTracks {
            playbook: 25,
            ..Default::default()
        };
        let remaining = xp.try_spend(XpTrack::Playbook, 10).unwrap();
        assert_eq!(remaining, 15);
        assert_eq!(xp.playbook, 15);
    }

    #[test]
    fn spend_refuses_without_mutating() {
        let mut xp = XpTracks {
            insight: 3,
            ..Default::default()
        };
        let err = xp.try_spend(XpTrack::Insight, 5).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient insight XP. Have 3, need 5");
        assert_eq!(xp.insight, 3);
    }

    #[test]
    fn caps_differ_by_track() {
        assert_eq!(XpTrack::Insight.cap(), 50);
        assert_eq!(XpTrack::Playbook.cap(), 100);
    }

    #[test]
    fn tracks_parse_from_wire_names() {
        for track in XpTrack::ALL {
            assert_eq!(track.as_str().parse::<XpTrack>().unwrap(), track);
        }
        assert!("heritage".parse::<XpTrack>().is_err());
    }
}
