//! Season replay
//!
//! Every season starts from the model's prior for the whole roster and
//! replays its matches in date order. Ratings never carry over between
//! seasons, so a season's result depends only on its own matches.

use crate::error::Result;
use crate::rating::model::{RatingMap, RatingModel};
use crate::season::partition::IndexedMatch;
use crate::season::ranking::{RankedPlayer, SeasonRanking};
use crate::types::{MatchDelta, PlayerId, PlayerRating, Roster, SeasonKey};
use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Outcome of replaying one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReplay {
    pub ranking: SeasonRanking,
    /// Terminal rating of every roster player, in roster order
    pub final_ratings: Vec<(PlayerId, PlayerRating)>,
    /// Per-match deltas keyed by the match's index in the full history
    pub deltas: BTreeMap<usize, MatchDelta>,
    /// History indices of this season's matches, in replay order
    pub match_indices: Vec<usize>,
}

impl SeasonReplay {
    pub fn season(&self) -> &SeasonKey {
        self.ranking.season()
    }

    pub fn final_rating(&self, player_id: &str) -> Option<&PlayerRating> {
        self.final_ratings
            .iter()
            .find(|(p, _)| p == player_id)
            .map(|(_, r)| r)
    }

    pub fn delta_for(&self, match_index: usize) -> Option<&MatchDelta> {
        self.deltas.get(&match_index)
    }
}

/// Replays seasons for a fixed roster and rating model
pub struct SeasonReplayEngine<'a> {
    model: &'a dyn RatingModel,
    roster: &'a Roster,
}

impl<'a> SeasonReplayEngine<'a> {
    pub fn new(model: &'a dyn RatingModel, roster: &'a Roster) -> Self {
        Self { model, roster }
    }

    /// Fresh prior for every roster player
    pub fn initial_ratings(&self) -> RatingMap {
        self.roster
            .iter()
            .map(|p| (p.clone(), self.model.create_prior()))
            .collect()
    }

    /// Replay one season's matches from a fresh prior
    ///
    /// Matches are sorted by date with a stable sort, so same-day matches
    /// keep their history order. Any invalid match fails the whole season.
    pub fn replay(&self, season: &SeasonKey, matches: &[IndexedMatch<'_>]) -> Result<SeasonReplay> {
        let mut ratings = self.initial_ratings();

        let mut ordered = matches.to_vec();
        ordered.sort_by_key(|m| m.record.date());

        let mut deltas = BTreeMap::new();
        for entry in &ordered {
            let record = entry.record;
            let delta = self
                .model
                .apply_match(
                    &mut ratings,
                    record.team_one(),
                    record.team_two(),
                    record.winning_team(),
                )
                .with_context(|| {
                    format!(
                        "Failed to replay match #{} ({}) in {}",
                        entry.index,
                        record.date(),
                        season
                    )
                })?;
            deltas.insert(entry.index, delta);
        }

        let final_ratings: Vec<(PlayerId, PlayerRating)> = self
            .roster
            .iter()
            .filter_map(|p| ratings.get(p).map(|r| (p.clone(), *r)))
            .collect();

        let entries = final_ratings
            .iter()
            .map(|(player_id, rating)| RankedPlayer {
                player_id: player_id.clone(),
                rating: *rating,
                value: self.model.conservative_value(rating),
            })
            .collect();
        let ranking = SeasonRanking::new(season.clone(), entries);

        debug!(
            "Replayed {} with {} matches for {} players",
            season,
            ordered.len(),
            self.roster.len()
        );

        Ok(SeasonReplay {
            ranking,
            final_ratings,
            deltas,
            match_indices: ordered.iter().map(|m| m.index).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LadderError;
    use crate::rating::model::tests::StepModel;
    use crate::rating::trueskill::TrueSkillModel;
    use crate::types::{parse_date, MatchRecord, Team};

    fn record(one: (&str, &str), two: (&str, &str), one_wins: bool, date: &str) -> MatchRecord {
        let one = Team::new(one.0, one.1).unwrap();
        let two = Team::new(two.0, two.1).unwrap();
        let winner = if one_wins { one.clone() } else { two.clone() };
        MatchRecord::new(one, two, &winner, parse_date(date).unwrap()).unwrap()
    }

    fn indexed(matches: &[MatchRecord]) -> Vec<IndexedMatch<'_>> {
        matches
            .iter()
            .enumerate()
            .map(|(index, record)| IndexedMatch { index, record })
            .collect()
    }

    fn season() -> SeasonKey {
        SeasonKey::new("Season 1")
    }

    #[test]
    fn test_single_match_season() {
        let model = TrueSkillModel::default();
        let roster = Roster::new(["A", "B", "C", "D"]);
        let engine = SeasonReplayEngine::new(&model, &roster);
        let matches = vec![record(("A", "B"), ("C", "D"), true, "2025-03-01")];

        let replay = engine.replay(&season(), &indexed(&matches)).unwrap();

        let value = |p: &str| replay.ranking.get(p).unwrap().value;
        assert_eq!(value("A"), value("B"));
        assert_eq!(value("C"), value("D"));
        assert!(value("A") > value("C"));

        let order: Vec<&str> = replay
            .ranking
            .entries()
            .iter()
            .map(|e| e.player_id.as_str())
            .collect();
        assert_eq!(order, ["A", "B", "C", "D"]);

        let delta = replay.delta_for(0).unwrap();
        assert!(delta["A"] > 0.0 && delta["B"] > 0.0);
        assert!(delta["C"] < 0.0 && delta["D"] < 0.0);
    }

    #[test]
    fn test_empty_season_keeps_prior_in_roster_order() {
        let model = TrueSkillModel::default();
        let roster = Roster::new(["Zoe", "Ana", "Max"]);
        let engine = SeasonReplayEngine::new(&model, &roster);

        let replay = engine.replay(&season(), &[]).unwrap();

        let order: Vec<&str> = replay
            .ranking
            .entries()
            .iter()
            .map(|e| e.player_id.as_str())
            .collect();
        assert_eq!(order, ["Zoe", "Ana", "Max"]);
        assert!(replay
            .final_ratings
            .iter()
            .all(|(_, r)| *r == model.create_prior()));
        assert!(replay.deltas.is_empty());
    }

    #[test]
    fn test_idle_roster_player_stays_at_prior() {
        let model = TrueSkillModel::default();
        let roster = Roster::new(["A", "B", "C", "D", "E"]);
        let engine = SeasonReplayEngine::new(&model, &roster);
        let matches = vec![
            record(("A", "B"), ("C", "D"), true, "2025-03-01"),
            record(("A", "C"), ("B", "D"), false, "2025-03-02"),
        ];

        let replay = engine.replay(&season(), &indexed(&matches)).unwrap();

        assert_eq!(replay.final_rating("E"), Some(&model.create_prior()));
        assert_eq!(replay.final_ratings.len(), 5);
    }

    #[test]
    fn test_matches_replayed_by_date_and_keyed_by_history_index() {
        let model = StepModel;
        let roster = Roster::new(["A", "B", "C", "D"]);
        let engine = SeasonReplayEngine::new(&model, &roster);
        let matches = vec![
            record(("A", "B"), ("C", "D"), true, "2025-04-10"),
            record(("A", "B"), ("C", "D"), false, "2025-02-01"),
            record(("A", "C"), ("B", "D"), true, "2025-02-01"),
        ];

        let replay = engine.replay(&season(), &indexed(&matches)).unwrap();

        assert_eq!(replay.match_indices, [1, 2, 0]);
        assert_eq!(replay.delta_for(1).unwrap()["C"], 1.0);
        assert_eq!(replay.delta_for(0).unwrap()["A"], 1.0);
        assert_eq!(replay.final_rating("A").unwrap().mean, 11.0);
    }

    #[test]
    fn test_unknown_player_fails_the_season() {
        let model = TrueSkillModel::default();
        let roster = Roster::new(["A", "B", "C"]);
        let engine = SeasonReplayEngine::new(&model, &roster);
        let matches = vec![record(("A", "B"), ("C", "X"), true, "2025-03-01")];

        let err = engine.replay(&season(), &indexed(&matches)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::UnknownPlayer { player_id }) if player_id == "X"
        ));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let model = TrueSkillModel::default();
        let roster = Roster::new(["A", "B", "C", "D"]);
        let engine = SeasonReplayEngine::new(&model, &roster);
        let matches = vec![
            record(("A", "B"), ("C", "D"), true, "2025-03-01"),
            record(("A", "C"), ("B", "D"), false, "2025-03-01"),
            record(("A", "D"), ("B", "C"), true, "2025-03-05"),
        ];

        let first = engine.replay(&season(), &indexed(&matches)).unwrap();
        let second = engine.replay(&season(), &indexed(&matches)).unwrap();

        assert_eq!(first, second);
    }
}
