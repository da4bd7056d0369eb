//! Season assignment, partitioning and per-season replay

pub mod calendar;
pub mod partition;
pub mod ranking;
pub mod replay;

pub use calendar::{PeriodCalendar, SeasonCalendar};
pub use partition::{sort_seasons, IndexedMatch, SeasonBucket, SeasonPartition, SeasonPartitioner};
pub use ranking::{RankedPlayer, SeasonRanking};
pub use replay::{SeasonReplay, SeasonReplayEngine};
