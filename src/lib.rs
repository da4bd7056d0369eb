//! Season Ladder - TrueSkill doubles rankings partitioned by season
//!
//! This crate replays a recorded history of two-versus-two matches season by
//! season from a fresh prior, ranks the roster per season, and aggregates
//! podiums, titles, badges and per-player statistics on top.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod rating;
pub mod season;
pub mod source;
pub mod standings;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use engine::{compute_all_season_rankings, LadderEngine, SeasonTable};
pub use rating::{RatingModel, TrueSkillModel};
pub use season::{PeriodCalendar, SeasonCalendar};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
