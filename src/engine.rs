//! Ladder pipeline
//!
//! Ties the partitioner, the per-season replay and the aggregation together.
//! Every call builds fresh results from its inputs; nothing is cached.

use crate::config::AppConfig;
use crate::error::Result;
use crate::history::{cumulative_history, RatingHistory};
use crate::rating::model::RatingModel;
use crate::rating::trueskill::TrueSkillModel;
use crate::season::calendar::{PeriodCalendar, SeasonCalendar};
use crate::season::partition::{SeasonPartition, SeasonPartitioner};
use crate::season::ranking::SeasonRanking;
use crate::season::replay::{SeasonReplay, SeasonReplayEngine};
use crate::standings::aggregator::{compute_standings, Standings};
use crate::types::{MatchDelta, MatchRecord, Roster, SeasonKey, TournamentWin};
use serde::Serialize;
use tracing::debug;

/// Replays of every season, in season order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonTable {
    seasons: Vec<SeasonReplay>,
}

impl SeasonTable {
    pub fn seasons(&self) -> &[SeasonReplay] {
        &self.seasons
    }

    pub fn season_keys(&self) -> impl Iterator<Item = &SeasonKey> {
        self.seasons.iter().map(|s| s.season())
    }

    pub fn get(&self, season: &SeasonKey) -> Option<&SeasonReplay> {
        self.seasons.iter().find(|s| s.season() == season)
    }

    pub fn ranking(&self, season: &SeasonKey) -> Option<&SeasonRanking> {
        self.get(season).map(|s| &s.ranking)
    }

    /// Last season in the order
    pub fn latest(&self) -> Option<&SeasonReplay> {
        self.seasons.last()
    }

    /// Deltas of a match by its index in the original history
    pub fn delta_for(&self, match_index: usize) -> Option<&MatchDelta> {
        self.seasons.iter().find_map(|s| s.delta_for(match_index))
    }

    pub fn delta_for_player(&self, match_index: usize, player_id: &str) -> Option<f64> {
        self.delta_for(match_index)
            .and_then(|d| d.get(player_id))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Replay every season of `matches` independently
///
/// Seasons with no matches never appear; a roster with no history yields an
/// empty table. The first invalid match aborts the whole call.
pub fn compute_all_season_rankings(
    model: &dyn RatingModel,
    roster: &Roster,
    matches: &[MatchRecord],
    calendar: &dyn SeasonCalendar,
) -> Result<SeasonTable> {
    let partition = SeasonPartitioner::new(calendar).partition(matches);
    replay_partition(model, roster, &partition)
}

/// Replay an already partitioned history
pub fn replay_partition(
    model: &dyn RatingModel,
    roster: &Roster,
    partition: &SeasonPartition<'_>,
) -> Result<SeasonTable> {
    let engine = SeasonReplayEngine::new(model, roster);
    let seasons = partition
        .iter()
        .map(|bucket| engine.replay(&bucket.season, &bucket.matches))
        .collect::<Result<Vec<_>>>()?;

    debug!("Computed rankings for {} seasons", seasons.len());
    Ok(SeasonTable { seasons })
}

/// Rating model plus season calendar
pub struct LadderEngine {
    model: Box<dyn RatingModel>,
    calendar: Box<dyn SeasonCalendar>,
}

impl LadderEngine {
    pub fn new(model: Box<dyn RatingModel>, calendar: Box<dyn SeasonCalendar>) -> Self {
        Self { model, calendar }
    }

    /// TrueSkill model and period calendar from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let model = TrueSkillModel::new(config.rating.clone())?;
        let calendar = PeriodCalendar::new(config.season.clone())?;
        Ok(Self::new(Box::new(model), Box::new(calendar)))
    }

    pub fn model(&self) -> &dyn RatingModel {
        self.model.as_ref()
    }

    pub fn calendar(&self) -> &dyn SeasonCalendar {
        self.calendar.as_ref()
    }

    pub fn partition<'a>(&self, matches: &'a [MatchRecord]) -> SeasonPartition<'a> {
        SeasonPartitioner::new(self.calendar()).partition(matches)
    }

    pub fn season_table(&self, roster: &Roster, matches: &[MatchRecord]) -> Result<SeasonTable> {
        compute_all_season_rankings(self.model(), roster, matches, self.calendar())
    }

    /// Season table plus podium and tournament tallies
    pub fn standings(
        &self,
        roster: &Roster,
        matches: &[MatchRecord],
        tournaments: &[TournamentWin],
    ) -> Result<(SeasonTable, Standings)> {
        let table = self.season_table(roster, matches)?;
        let standings = compute_standings(&table, matches).with_tournaments(tournaments);
        Ok((table, standings))
    }

    pub fn cumulative_history(
        &self,
        roster: &Roster,
        matches: &[MatchRecord],
    ) -> Result<RatingHistory> {
        cumulative_history(self.model(), roster, matches)
    }
}

impl Default for LadderEngine {
    fn default() -> Self {
        Self::new(
            Box::new(TrueSkillModel::default()),
            Box::new(PeriodCalendar::default()),
        )
    }
}
