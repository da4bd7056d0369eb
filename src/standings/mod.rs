//! Standings, badges and per-player statistics derived from the season table

pub mod aggregator;
pub mod badges;
pub mod insights;
pub mod statistics;

pub use aggregator::{compute_standings, tally_tournaments, SeasonChampion, Standings, StandingsTally};
pub use badges::{skill_tier_of, title_badge_of, SkillTier, TitleBadge};
pub use insights::{pair_table, player_insights, HeadToHead, PairRecord, PlayerInsights};
pub use statistics::{compute_statistics, PlayerStatistics};
