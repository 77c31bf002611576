//! Value objects - the sheet's fixed-shape building blocks

mod coin_stats;
mod entries;
mod harm_track;
mod skills;
mod stress_track;
mod xp_tracks;

pub use coin_stats::{CoinStat, CoinStats};
pub use entries::{EntryDetail, HeritageBenefit, HeritageDetriment, NamedEntry};
pub use harm_track::HarmTrack;
pub use skills::{Action, InsightSkills, ProwessSkills, ResolveSkills, SkillBlock, SkillCategory};
pub use stress_track::StressTrack;
pub use xp_tracks::{XpTrack, XpTracks};
