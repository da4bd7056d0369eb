//! Season calendar configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters of the default half-year season calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// First day of `Season 1`; earlier dates fall into the legacy season
    pub epoch: NaiveDate,
    /// Number of seasons per calendar year (must divide 12)
    pub periods_per_year: u32,
    /// Label prefix for numbered seasons
    pub label_prefix: String,
    /// Key for matches played before the epoch
    pub legacy_label: String,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(2025, 1, 1).expect("2025-01-01 is a valid date"),
            periods_per_year: 2,
            label_prefix: "Season".to_string(),
            legacy_label: "Season 0".to_string(),
        }
    }
}
