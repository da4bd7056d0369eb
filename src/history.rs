//! All-time rating trajectory
//!
//! Unlike the season table this replays the whole history once, without
//! resetting at season boundaries.

use crate::error::Result;
use crate::rating::model::{RatingMap, RatingModel};
use crate::types::{MatchRecord, PlayerId, Roster};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

/// Conservative value of one player after a given date's match
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Trajectory of every roster player, in roster order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingHistory {
    pub series: Vec<(PlayerId, Vec<HistoryPoint>)>,
}

impl RatingHistory {
    pub fn points_for(&self, player_id: &str) -> Option<&[HistoryPoint]> {
        self.series
            .iter()
            .find(|(p, _)| p == player_id)
            .map(|(_, points)| points.as_slice())
    }
}

/// Replay the full history in date order and sample every roster player
///
/// The first point of each series is the prior at the first match's date,
/// followed by one point per match. An empty history gives empty series.
pub fn cumulative_history(
    model: &dyn RatingModel,
    roster: &Roster,
    matches: &[MatchRecord],
) -> Result<RatingHistory> {
    let mut ordered: Vec<(usize, &MatchRecord)> = matches.iter().enumerate().collect();
    ordered.sort_by_key(|(_, m)| m.date());

    let mut ratings: RatingMap = roster
        .iter()
        .map(|p| (p.clone(), model.create_prior()))
        .collect();
    let mut series: Vec<(PlayerId, Vec<HistoryPoint>)> = roster
        .iter()
        .map(|p| (p.clone(), Vec::with_capacity(ordered.len() + 1)))
        .collect();

    let sample = |ratings: &RatingMap, series: &mut Vec<(PlayerId, Vec<HistoryPoint>)>, date| {
        for (player_id, points) in series.iter_mut() {
            if let Some(rating) = ratings.get(player_id) {
                points.push(HistoryPoint {
                    date,
                    value: model.conservative_value(rating),
                });
            }
        }
    };

    if let Some((_, first)) = ordered.first() {
        sample(&ratings, &mut series, first.date());
    }

    for (index, record) in ordered {
        model
            .apply_match(
                &mut ratings,
                record.team_one(),
                record.team_two(),
                record.winning_team(),
            )
            .with_context(|| format!("Failed to replay match #{} ({})", index, record.date()))?;
        sample(&ratings, &mut series, record.date());
    }

    Ok(RatingHistory { series })
}
