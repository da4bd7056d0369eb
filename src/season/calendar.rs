//! Season assignment
//!
//! The ladder only asks a calendar for a season key when a match record does
//! not carry one. Any `Fn(NaiveDate) -> SeasonKey` works as a calendar.

use crate::config::SeasonConfig;
use crate::error::{LadderError, Result};
use crate::types::SeasonKey;
use chrono::{Datelike, NaiveDate};

/// Maps a match date to the season it belongs to
pub trait SeasonCalendar {
    fn season_of(&self, date: NaiveDate) -> SeasonKey;

    /// Key for matches played before any numbered season; sorts first
    fn legacy_key(&self) -> Option<SeasonKey> {
        None
    }
}

impl<F> SeasonCalendar for F
where
    F: Fn(NaiveDate) -> SeasonKey,
{
    fn season_of(&self, date: NaiveDate) -> SeasonKey {
        self(date)
    }
}

/// Calendar splitting each year into equal periods, two by default
///
/// With the default configuration dates before 2025-01-01 fall into
/// `Season 0`, January-June 2025 is `Season 1`, July-December 2025 is
/// `Season 2`, and so on.
#[derive(Debug, Clone, Default)]
pub struct PeriodCalendar {
    config: SeasonConfig,
}

impl PeriodCalendar {
    pub fn new(config: SeasonConfig) -> Result<Self> {
        let periods = config.periods_per_year;
        if periods == 0 || 12 % periods != 0 {
            return Err(LadderError::config(format!(
                "Periods per year must divide 12, got {}",
                periods
            ))
            .into());
        }
        Ok(Self { config })
    }

    fn period_index(&self, date: NaiveDate) -> u32 {
        date.month0() / (12 / self.config.periods_per_year)
    }
}

impl SeasonCalendar for PeriodCalendar {
    fn season_of(&self, date: NaiveDate) -> SeasonKey {
        let epoch = self.config.epoch;
        if date < epoch {
            return SeasonKey::new(self.config.legacy_label.clone());
        }

        let periods = i64::from(self.config.periods_per_year);
        let elapsed = periods * i64::from(date.year() - epoch.year())
            + i64::from(self.period_index(date))
            - i64::from(self.period_index(epoch));

        SeasonKey::new(format!("{} {}", self.config.label_prefix, 1 + elapsed))
    }

    fn legacy_key(&self) -> Option<SeasonKey> {
        Some(SeasonKey::new(self.config.legacy_label.clone()))
    }
}
