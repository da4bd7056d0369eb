//! TrueSkill rating model
//!
//! This module provides the concrete rating model for doubles matches using
//! the two-team TrueSkill update from the skillratings crate.

use crate::config::RatingConfig;
use crate::error::{LadderError, Result};
use crate::rating::model::RatingModel;
use crate::types::{PlayerRating, Side};
use skillratings::trueskill::{trueskill_two_teams, TrueSkillConfig, TrueSkillRating};
use skillratings::Outcomes;

/// TrueSkill model with a fixed prior and conservative-value factor
#[derive(Debug, Clone)]
pub struct TrueSkillModel {
    config: RatingConfig,
    trueskill: TrueSkillConfig,
}

impl TrueSkillModel {
    /// Create a new TrueSkill model
    pub fn new(config: RatingConfig) -> Result<Self> {
        if config.beta <= 0.0 {
            return Err(LadderError::config("Beta must be positive").into());
        }
        if config.initial_uncertainty <= 0.0 {
            return Err(LadderError::config("Initial uncertainty must be positive").into());
        }
        if config.tau < 0.0 {
            return Err(LadderError::config("Tau must be non-negative").into());
        }
        if !(0.0..1.0).contains(&config.draw_probability) {
            return Err(LadderError::config("Draw probability must be in [0, 1)").into());
        }

        let trueskill = TrueSkillConfig {
            draw_probability: config.draw_probability,
            beta: config.beta,
            default_dynamics: config.tau,
        };

        Ok(Self { config, trueskill })
    }
}

impl Default for TrueSkillModel {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            trueskill: TrueSkillConfig {
                draw_probability: config.draw_probability,
                beta: config.beta,
                default_dynamics: config.tau,
            },
            config,
        }
    }
}

impl RatingModel for TrueSkillModel {
    fn create_prior(&self) -> PlayerRating {
        PlayerRating {
            mean: self.config.initial_mean,
            uncertainty: self.config.initial_uncertainty,
        }
    }

    fn conservative_value(&self, rating: &PlayerRating) -> f64 {
        rating.conservative(self.config.conservative_factor)
    }

    fn rate_teams(
        &self,
        team_one: [PlayerRating; 2],
        team_two: [PlayerRating; 2],
        winner: Side,
    ) -> Result<([PlayerRating; 2], [PlayerRating; 2])> {
        let one: Vec<TrueSkillRating> = team_one.iter().map(|r| (*r).into()).collect();
        let two: Vec<TrueSkillRating> = team_two.iter().map(|r| (*r).into()).collect();

        let outcome = match winner {
            Side::TeamOne => Outcomes::WIN,
            Side::TeamTwo => Outcomes::LOSS,
        };

        let (new_one, new_two) = trueskill_two_teams(&one, &two, &outcome, &self.trueskill);

        let pair = |ratings: Vec<TrueSkillRating>| -> Result<[PlayerRating; 2]> {
            match ratings.as_slice() {
                [a, b] => Ok([(*a).into(), (*b).into()]),
                _ => Err(LadderError::invalid_match(format!(
                    "rating update returned {} players for a pair",
                    ratings.len()
                ))
                .into()),
            }
        };

        Ok((pair(new_one)?, pair(new_two)?))
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::model::RatingMap;
    use crate::types::Team;

    fn fresh_map(model: &TrueSkillModel) -> RatingMap {
        ["A", "B", "C", "D"]
            .iter()
            .map(|p| (p.to_string(), model.create_prior()))
            .collect()
    }

    #[test]
    fn test_prior_matches_config() {
        let model = TrueSkillModel::default();
        let prior = model.create_prior();
        assert_eq!(prior.mean, 25.0);
        assert_eq!(prior.uncertainty, 12.0);
        assert_eq!(model.conservative_value(&prior), 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RatingConfig {
            beta: 0.0,
            ..RatingConfig::default()
        };
        assert!(TrueSkillModel::new(config).is_err());

        let config = RatingConfig {
            initial_uncertainty: -1.0,
            ..RatingConfig::default()
        };
        assert!(TrueSkillModel::new(config).is_err());
    }

    #[test]
    fn test_single_match_from_prior() {
        let model = TrueSkillModel::default();
        let mut ratings = fresh_map(&model);
        let one = Team::new("A", "B").unwrap();
        let two = Team::new("C", "D").unwrap();

        let delta = model.apply_match(&mut ratings, &one, &two, &one).unwrap();

        let value = |p: &str| model.conservative_value(&ratings[p]);
        assert_eq!(value("A"), value("B"));
        assert_eq!(value("C"), value("D"));
        assert!(value("A") > value("C"));

        assert!(ratings["A"].mean > 25.0);
        assert!(ratings["C"].mean < 25.0);
        assert!(ratings["A"].uncertainty < 12.0);
        assert!(ratings["C"].uncertainty < 12.0);

        assert!(delta["A"] > 0.0 && delta["B"] > 0.0);
        assert!(delta["C"] < 0.0 && delta["D"] < 0.0);
    }

    #[test]
    fn test_winner_by_identity_not_position() {
        let model = TrueSkillModel::default();
        let one = Team::new("A", "B").unwrap();
        let two = Team::new("C", "D").unwrap();

        let mut by_position = fresh_map(&model);
        let mut swapped = fresh_map(&model);
        let first = model.apply_match(&mut by_position, &one, &two, &two).unwrap();
        let second = model
            .apply_match(&mut swapped, &one, &two, &Team::new("D", "C").unwrap())
            .unwrap();

        assert_eq!(first, second);
        assert!(first["C"] > 0.0);
        assert!(first["A"] < 0.0);
    }

    #[test]
    fn test_deltas_rounded_to_cents() {
        let model = TrueSkillModel::default();
        let mut ratings = fresh_map(&model);
        let one = Team::new("A", "B").unwrap();
        let two = Team::new("C", "D").unwrap();

        let delta = model.apply_match(&mut ratings, &one, &two, &one).unwrap();

        for change in delta.values() {
            assert_eq!(*change, (change * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn test_config_json() {
        let model = TrueSkillModel::default();
        let config = model.config();
        assert_eq!(config["beta"], 6.0);
        assert_eq!(config["conservative_factor"], 2.0);
    }
}
