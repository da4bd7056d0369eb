//! Final standings of one season's replay

use crate::types::{PlayerId, PlayerRating, SeasonKey};
use serde::Serialize;

/// One row of a season ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub rating: PlayerRating,
    /// Conservative value used for the ordering
    pub value: f64,
}

/// Players ordered by conservative value, highest first
///
/// Equal values keep roster order, so the ranking is a total order even
/// when nobody has played yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRanking {
    season: SeasonKey,
    entries: Vec<RankedPlayer>,
}

impl SeasonRanking {
    /// `entries` must be in roster order
    pub fn new(season: SeasonKey, mut entries: Vec<RankedPlayer>) -> Self {
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { season, entries }
    }

    pub fn season(&self) -> &SeasonKey {
        &self.season
    }

    pub fn entries(&self) -> &[RankedPlayer] {
        &self.entries
    }

    /// Zero-based position of a player
    pub fn position(&self, player_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.player_id == player_id)
    }

    pub fn get(&self, player_id: &str) -> Option<&RankedPlayer> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    pub fn champion(&self) -> Option<&RankedPlayer> {
        self.entries.first()
    }

    /// Champion, runner-up and third place, as far as the roster allows
    pub fn podium(&self) -> &[RankedPlayer] {
        &self.entries[..self.entries.len().min(3)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
