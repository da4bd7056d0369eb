//! Rating model trait
//!
//! A rating model owns the prior and the per-match update; the season replay
//! only threads a working map of ratings through it.

use crate::error::{LadderError, Result};
use crate::types::{MatchDelta, PlayerId, PlayerRating, Side, Team};
use crate::utils::round_to_cents;
use std::collections::HashMap;

/// Working ratings for one replay, keyed by player
pub type RatingMap = HashMap<PlayerId, PlayerRating>;

/// Trait for two-versus-two skill models
pub trait RatingModel: Send + Sync {
    /// Fresh rating given to every roster player at the start of a season
    fn create_prior(&self) -> PlayerRating;

    /// Scalar used for ranking and display
    fn conservative_value(&self, rating: &PlayerRating) -> f64;

    /// Update both pairs given which side won
    fn rate_teams(
        &self,
        team_one: [PlayerRating; 2],
        team_two: [PlayerRating; 2],
        winner: Side,
    ) -> Result<([PlayerRating; 2], [PlayerRating; 2])>;

    /// Current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Feed one match through the model, updating `ratings` in place
    ///
    /// Returns each of the four players' change in conservative value,
    /// rounded to two decimals. On error `ratings` is left untouched.
    fn apply_match(
        &self,
        ratings: &mut RatingMap,
        team_one: &Team,
        team_two: &Team,
        winning_team: &Team,
    ) -> Result<MatchDelta> {
        let winner = if winning_team.same_players(team_one) {
            Side::TeamOne
        } else if winning_team.same_players(team_two) {
            Side::TeamTwo
        } else {
            return Err(LadderError::invalid_match(format!(
                "winner {} matches neither {} nor {}",
                winning_team, team_one, team_two
            ))
            .into());
        };

        if team_one.players().iter().any(|p| team_two.contains(p)) {
            return Err(LadderError::invalid_match(format!(
                "teams {} and {} share a player",
                team_one, team_two
            ))
            .into());
        }

        let current: &RatingMap = ratings;
        let lookup = |team: &Team| -> Result<[PlayerRating; 2]> {
            let [a, b] = team.players();
            Ok([current_rating(current, a)?, current_rating(current, b)?])
        };
        let old_one = lookup(team_one)?;
        let old_two = lookup(team_two)?;

        let (new_one, new_two) = self.rate_teams(old_one, old_two, winner)?;

        let mut delta = MatchDelta::new();
        let updates = team_one
            .players()
            .iter()
            .zip(old_one.iter().zip(new_one))
            .chain(team_two.players().iter().zip(old_two.iter().zip(new_two)));
        for (player_id, (old, new)) in updates {
            let change = self.conservative_value(&new) - self.conservative_value(old);
            delta.insert(player_id.clone(), round_to_cents(change));
            ratings.insert(player_id.clone(), new);
        }

        Ok(delta)
    }
}

fn current_rating(ratings: &RatingMap, player_id: &PlayerId) -> Result<PlayerRating> {
    ratings.get(player_id).copied().ok_or_else(|| {
        LadderError::UnknownPlayer {
            player_id: player_id.clone(),
        }
        .into()
    })
}
