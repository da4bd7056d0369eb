//! Main application configuration
//!
//! This module defines the primary configuration structures for the season
//! ladder, including TOML and environment variable loading and validation.

use crate::config::{RatingConfig, SeasonConfig};
use crate::types::parse_date;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub season: SeasonConfig,
    pub data: DataSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where the file-backed data source looks for its inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding the data files
    pub data_dir: PathBuf,
    /// JSON array of player names
    pub roster_file: String,
    /// Match history CSV
    pub matches_file: String,
    /// Tournament winners CSV
    pub tournaments_file: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "season-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            roster_file: "players.json".to_string(),
            matches_file: "matches.csv".to_string(),
            tournaments_file: "tournaments.csv".to_string(),
        }
    }
}

impl DataSettings {
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(&self.roster_file)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(&self.matches_file)
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.data_dir.join(&self.tournaments_file)
    }
}

/// Overwrite `target` with the parsed value of `name` when it is set
fn env_override<T: FromStr>(name: &str, target: &mut T) -> Result<()> {
    if let Ok(raw) = env::var(name) {
        *target = raw
            .parse()
            .map_err(|_| anyhow!("Invalid {} value: {}", name, raw))?;
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        env_override("SERVICE_NAME", &mut config.service.name)?;
        env_override("LOG_LEVEL", &mut config.service.log_level)?;

        // Rating settings
        env_override("RATING_INITIAL_MEAN", &mut config.rating.initial_mean)?;
        env_override(
            "RATING_INITIAL_UNCERTAINTY",
            &mut config.rating.initial_uncertainty,
        )?;
        env_override("RATING_BETA", &mut config.rating.beta)?;
        env_override("RATING_TAU", &mut config.rating.tau)?;
        env_override(
            "RATING_CONSERVATIVE_FACTOR",
            &mut config.rating.conservative_factor,
        )?;

        // Season settings
        if let Ok(epoch) = env::var("SEASON_EPOCH") {
            config.season.epoch =
                parse_date(&epoch).map_err(|_| anyhow!("Invalid SEASON_EPOCH value: {}", epoch))?;
        }
        env_override(
            "SEASON_PERIODS_PER_YEAR",
            &mut config.season.periods_per_year,
        )?;

        // Data settings
        env_override("DATA_DIR", &mut config.data.data_dir)?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate rating settings
    let rating = &config.rating;
    if rating.beta <= 0.0 {
        return Err(anyhow!("Beta must be positive"));
    }
    if rating.initial_uncertainty <= 0.0 {
        return Err(anyhow!("Initial uncertainty must be positive"));
    }
    if rating.tau < 0.0 {
        return Err(anyhow!("Tau must be non-negative"));
    }
    if !(0.0..1.0).contains(&rating.draw_probability) {
        return Err(anyhow!("Draw probability must be in [0, 1)"));
    }
    if rating.conservative_factor <= 0.0 {
        return Err(anyhow!("Conservative factor must be positive"));
    }

    // Validate season settings
    let periods = config.season.periods_per_year;
    if periods == 0 || 12 % periods != 0 {
        return Err(anyhow!(
            "Periods per year must divide 12, got {}",
            periods
        ));
    }
    if config.season.legacy_label.is_empty() || config.season.label_prefix.is_empty() {
        return Err(anyhow!("Season labels cannot be empty"));
    }

    Ok(())
}
