//! Rating system configuration

use serde::{Deserialize, Serialize};

/// TrueSkill parameters plus the conservative-value factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Prior mean for every player at the start of a season
    pub initial_mean: f64,
    /// Prior uncertainty for every player at the start of a season
    pub initial_uncertainty: f64,
    /// Performance spread per player
    pub beta: f64,
    /// Volatility added before each update
    pub tau: f64,
    /// Always 0 for this ladder: matches cannot be drawn
    pub draw_probability: f64,
    /// `c` in `mean - c * uncertainty`
    pub conservative_factor: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_mean: 25.0,
            initial_uncertainty: 12.0,
            beta: 6.0,
            tau: 0.3,
            draw_probability: 0.0,
            conservative_factor: 2.0,
        }
    }
}
