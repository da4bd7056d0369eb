//! File-backed data source
//!
//! The roster is a JSON array of names. Matches and tournaments are CSV
//! files with a header row. Rows that fail validation are skipped with a
//! warning; a missing match or tournament file reads as empty.

use crate::config::DataSettings;
use crate::error::{LadderError, Result};
use crate::source::provider::{MatchHistoryProvider, RosterProvider, TournamentProvider};
use crate::types::{parse_date, MatchRecord, PlayerId, Roster, SetScore, Team, TournamentWin};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One line of `matches.csv`
#[derive(Debug, Deserialize)]
struct MatchRow {
    team1_player1: String,
    team1_player2: String,
    team2_player1: String,
    team2_player2: String,
    #[serde(default)]
    first_set_winner1: String,
    #[serde(default)]
    first_set_winner2: String,
    winner1: String,
    winner2: String,
    #[serde(default)]
    mvp: String,
    #[serde(default)]
    scores: String,
    #[serde(default)]
    tie_breaks: Option<u32>,
    #[serde(default)]
    venue: String,
    date: String,
    #[serde(default)]
    season: String,
}

impl MatchRow {
    fn into_record(self) -> Result<MatchRecord> {
        let team_one = Team::new(self.team1_player1, self.team1_player2)?;
        let team_two = Team::new(self.team2_player1, self.team2_player2)?;
        let winner = Team::new(self.winner1, self.winner2)?;
        let date = parse_date(&self.date)?;

        let mut record = MatchRecord::new(team_one, team_two, &winner, date)?;

        if !self.first_set_winner1.is_empty() || !self.first_set_winner2.is_empty() {
            let first_set = Team::new(self.first_set_winner1, self.first_set_winner2)?;
            record = record.with_first_set_winner(&first_set)?;
        }
        if !self.mvp.is_empty() {
            record = record.with_mvp(self.mvp)?;
        }

        let scores = self
            .scores
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<SetScore>)
            .collect::<Result<Vec<_>>>()?;
        record = record.with_scores(scores).with_venue(self.venue);
        if let Some(tie_breaks) = self.tie_breaks {
            record = record.with_tie_breaks(tie_breaks);
        }
        if !self.season.is_empty() {
            record = record.with_season(self.season.as_str());
        }

        Ok(record)
    }
}

/// One line of `tournaments.csv`
#[derive(Debug, Deserialize)]
struct TournamentRow {
    date: String,
    winner1: String,
    winner2: String,
}

impl TournamentRow {
    fn into_win(self) -> Result<TournamentWin> {
        if self.winner1.is_empty() || self.winner2.is_empty() {
            return Err(LadderError::data_source("tournament needs two winners").into());
        }
        Ok(TournamentWin::new(
            parse_date(&self.date)?,
            self.winner1,
            self.winner2,
        ))
    }
}

/// Reads `players.json`, `matches.csv` and `tournaments.csv` from a directory
#[derive(Debug, Clone)]
pub struct FileDataSource {
    roster_path: PathBuf,
    matches_path: PathBuf,
    tournaments_path: PathBuf,
}

impl FileDataSource {
    /// Default file names inside `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_settings(&DataSettings {
            data_dir: data_dir.into(),
            ..DataSettings::default()
        })
    }

    pub fn from_settings(settings: &DataSettings) -> Self {
        Self {
            roster_path: settings.roster_path(),
            matches_path: settings.matches_path(),
            tournaments_path: settings.tournaments_path(),
        }
    }

    pub fn roster_path(&self) -> &Path {
        &self.roster_path
    }

    pub fn matches_path(&self) -> &Path {
        &self.matches_path
    }

    pub fn tournaments_path(&self) -> &Path {
        &self.tournaments_path
    }
}

/// Deserialize every row of a headed CSV file, skipping rows `convert` rejects
fn read_rows<R, T, F>(path: &Path, convert: F) -> Result<Vec<T>>
where
    R: DeserializeOwned,
    F: Fn(R) -> Result<T>,
{
    if !path.exists() {
        debug!("{} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LadderError::data_source(format!("{}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<R>().enumerate() {
        let line = index + 2;
        match result.map_err(anyhow::Error::from).and_then(&convert) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("Skipping {} line {}: {:#}", path.display(), line, e),
        }
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

impl RosterProvider for FileDataSource {
    /// Names are sorted alphabetically; the roster order is the ranking tie-break
    fn load_roster(&self) -> Result<Roster> {
        let file = File::open(&self.roster_path).map_err(|e| {
            LadderError::data_source(format!("{}: {}", self.roster_path.display(), e))
        })?;
        let mut names: Vec<PlayerId> = serde_json::from_reader(file)
            .with_context(|| format!("Invalid roster file {}", self.roster_path.display()))?;
        names.sort();

        let roster = Roster::new(names);
        debug!("Loaded {} players", roster.len());
        Ok(roster)
    }
}

impl MatchHistoryProvider for FileDataSource {
    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        read_rows(&self.matches_path, MatchRow::into_record)
    }
}

impl TournamentProvider for FileDataSource {
    fn load_tournaments(&self) -> Result<Vec<TournamentWin>> {
        read_rows(&self.tournaments_path, TournamentRow::into_win)
    }
}
