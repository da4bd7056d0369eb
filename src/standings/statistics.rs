//! Per-player match statistics
//!
//! These read the auxiliary fields of a match (scores, MVP, venue) that the
//! rating model ignores.

use crate::types::{MatchRecord, PlayerId, Roster, Side};
use crate::utils::percentage;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStatistics {
    pub player_id: PlayerId,
    pub matches_played: u32,
    pub wins: u32,
    pub mvp_awards: u32,
    pub sets_played: u32,
    pub sets_won: u32,
    /// Sets that went to a tie-break, counted for all four players
    pub tie_breaks: u32,
    pub first_sets_won: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub wins_by_venue: BTreeMap<String, u32>,
}

impl PlayerStatistics {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Self::default()
        }
    }

    pub fn win_percentage(&self) -> f64 {
        percentage(self.wins, self.matches_played)
    }

    pub fn first_set_percentage(&self) -> f64 {
        percentage(self.first_sets_won, self.matches_played)
    }

    pub fn games_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    fn record(&mut self, record: &MatchRecord, side: Side) {
        self.matches_played += 1;
        self.sets_played += record.scores().len() as u32;

        if record.winner() == side {
            self.wins += 1;
            if let Some(venue) = record.venue() {
                *self.wins_by_venue.entry(venue.to_string()).or_insert(0) += 1;
            }
        }
        if record.first_set_winner() == Some(side) {
            self.first_sets_won += 1;
        }
        if record.mvp() == Some(&self.player_id) {
            self.mvp_awards += 1;
        }

        for set in record.scores() {
            let (own, other) = match side {
                Side::TeamOne => (set.team_one_games, set.team_two_games),
                Side::TeamTwo => (set.team_two_games, set.team_one_games),
            };
            self.games_won += own;
            self.games_lost += other;
            if set.winner() == side {
                self.sets_won += 1;
            }
            if set.went_to_tie_break() {
                self.tie_breaks += 1;
            }
        }
    }
}

/// Statistics for every roster player over `matches`
///
/// Roster players come first in roster order, each with a row even without
/// matches; players only seen in matches follow in first-seen order.
pub fn compute_statistics<'a, I>(roster: &Roster, matches: I) -> Vec<PlayerStatistics>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut rows: Vec<PlayerStatistics> = roster
        .iter()
        .map(|p| PlayerStatistics::new(p.clone()))
        .collect();

    for record in matches {
        for side in [Side::TeamOne, Side::TeamTwo] {
            for player_id in record.team(side).players() {
                let position = match rows.iter().position(|r| &r.player_id == player_id) {
                    Some(position) => position,
                    None => {
                        rows.push(PlayerStatistics::new(player_id.clone()));
                        rows.len() - 1
                    }
                };
                rows[position].record(record, side);
            }
        }
    }

    rows
}
