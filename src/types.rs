//! Common types used throughout the season ladder

use crate::error::{LadderError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillRating;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for players
pub type PlayerId = String;

/// Signed change in conservative value per player for one match
pub type MatchDelta = BTreeMap<PlayerId, f64>;

/// Rating belief for one player within one season's replay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub mean: f64,
    pub uncertainty: f64,
}

impl PlayerRating {
    /// `mean - factor * uncertainty`
    pub fn conservative(&self, factor: f64) -> f64 {
        self.mean - factor * self.uncertainty
    }
}

impl From<TrueSkillRating> for PlayerRating {
    fn from(rating: TrueSkillRating) -> Self {
        Self {
            mean: rating.rating,
            uncertainty: rating.uncertainty,
        }
    }
}

impl From<PlayerRating> for TrueSkillRating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.mean,
            uncertainty: rating.uncertainty,
        }
    }
}

/// Season identifier such as `"Season 3"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonKey(String);

impl SeasonKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First run of ASCII digits in the key, if any
    pub fn ordinal(&self) -> Option<u64> {
        let digits: String = self
            .0
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeasonKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Which side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    TeamOne,
    TeamTwo,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::TeamOne => Side::TeamTwo,
            Side::TeamTwo => Side::TeamOne,
        }
    }
}

/// Player names are compared after trimming surrounding whitespace
fn normalize_player_id(player_id: PlayerId) -> PlayerId {
    player_id.trim().to_string()
}

/// A doubles pairing of two distinct players
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Team {
    players: [PlayerId; 2],
}

impl Team {
    pub fn new(first: impl Into<PlayerId>, second: impl Into<PlayerId>) -> Result<Self> {
        let first = normalize_player_id(first.into());
        let second = normalize_player_id(second.into());

        if first.is_empty() || second.is_empty() {
            return Err(LadderError::invalid_match("team has an unnamed player").into());
        }
        if first == second {
            return Err(LadderError::invalid_match(format!(
                "player {} appears twice in the same team",
                first
            ))
            .into());
        }

        Ok(Self {
            players: [first, second],
        })
    }

    pub fn players(&self) -> &[PlayerId; 2] {
        &self.players
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }

    /// Set equality: positions do not matter
    pub fn same_players(&self, other: &Team) -> bool {
        other.players.iter().all(|p| self.contains(p))
    }

    /// The other member of the team, if `player_id` belongs to it
    pub fn partner_of(&self, player_id: &str) -> Option<&PlayerId> {
        match &self.players {
            [a, b] if a == player_id => Some(b),
            [a, b] if b == player_id => Some(a),
            _ => None,
        }
    }

    fn shares_player_with(&self, other: &Team) -> bool {
        other.players.iter().any(|p| self.contains(p))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.players[0], self.players[1])
    }
}

/// Score of one set, e.g. `6-4` or `7-6(5)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team_one_games: u32,
    pub team_two_games: u32,
    /// Raw tie-break score when the set went to a tie-break
    pub tie_break: Option<String>,
}

impl SetScore {
    pub fn winner(&self) -> Side {
        if self.team_one_games > self.team_two_games {
            Side::TeamOne
        } else {
            Side::TeamTwo
        }
    }

    pub fn went_to_tie_break(&self) -> bool {
        self.tie_break.is_some()
    }
}

impl FromStr for SetScore {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let invalid = |reason: &str| LadderError::InvalidSetScore {
            score: raw.to_string(),
            reason: reason.to_string(),
        };

        let (games, tie_break) = match raw.split_once('(') {
            Some((games, rest)) => {
                let tb = rest
                    .strip_suffix(')')
                    .ok_or_else(|| invalid("unterminated tie-break"))?;
                (games, Some(tb.trim().to_string()))
            }
            None => (raw, None),
        };

        let (one, two) = games
            .split_once('-')
            .ok_or_else(|| invalid("expected games as n-n"))?;
        let team_one_games = one
            .trim()
            .parse()
            .map_err(|_| invalid("team one games is not a number"))?;
        let team_two_games = two
            .trim()
            .parse()
            .map_err(|_| invalid("team two games is not a number"))?;
        if team_one_games == team_two_games {
            return Err(invalid("a set cannot end level").into());
        }

        Ok(Self {
            team_one_games,
            team_two_games,
            tie_break,
        })
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team_one_games, self.team_two_games)?;
        if let Some(tb) = &self.tie_break {
            write!(f, "({})", tb)?;
        }
        Ok(())
    }
}

/// One recorded doubles match
///
/// Construction enforces four distinct players and a winner equal to one
/// of the two teams, so the replay engine never sees a malformed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    team_one: Team,
    team_two: Team,
    winner: Side,
    date: NaiveDate,
    season: Option<SeasonKey>,
    first_set_winner: Option<Side>,
    mvp: Option<PlayerId>,
    scores: Vec<SetScore>,
    tie_breaks: u32,
    venue: Option<String>,
}

impl MatchRecord {
    /// Create a match; `winner` is matched against the teams by player set
    pub fn new(team_one: Team, team_two: Team, winner: &Team, date: NaiveDate) -> Result<Self> {
        if team_one.shares_player_with(&team_two) {
            return Err(LadderError::invalid_match(format!(
                "teams {} and {} share a player",
                team_one, team_two
            ))
            .into());
        }

        let winner = side_of(&team_one, &team_two, winner).ok_or_else(|| {
            LadderError::invalid_match(format!(
                "winner {} matches neither {} nor {}",
                winner, team_one, team_two
            ))
        })?;

        Ok(Self {
            team_one,
            team_two,
            winner,
            date,
            season: None,
            first_set_winner: None,
            mvp: None,
            scores: Vec::new(),
            tie_breaks: 0,
            venue: None,
        })
    }

    /// Store an explicit season key; it is never overridden by the calendar
    pub fn with_season(mut self, season: impl Into<SeasonKey>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_first_set_winner(mut self, team: &Team) -> Result<Self> {
        let side = side_of(&self.team_one, &self.team_two, team).ok_or_else(|| {
            LadderError::invalid_match(format!("first set winner {} is not a team", team))
        })?;
        self.first_set_winner = Some(side);
        Ok(self)
    }

    pub fn with_mvp(mut self, player_id: impl Into<PlayerId>) -> Result<Self> {
        let player_id = player_id.into();
        if !self.involves(&player_id) {
            return Err(LadderError::invalid_match(format!(
                "mvp {} did not play this match",
                player_id
            ))
            .into());
        }
        self.mvp = Some(player_id);
        Ok(self)
    }

    /// Set scores; the tie-break count follows the scores
    pub fn with_scores(mut self, scores: Vec<SetScore>) -> Self {
        self.tie_breaks = scores.iter().filter(|s| s.went_to_tie_break()).count() as u32;
        self.scores = scores;
        self
    }

    pub fn with_tie_breaks(mut self, tie_breaks: u32) -> Self {
        self.tie_breaks = tie_breaks;
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        let venue = venue.into();
        self.venue = (!venue.trim().is_empty()).then_some(venue);
        self
    }

    pub fn team_one(&self) -> &Team {
        &self.team_one
    }

    pub fn team_two(&self) -> &Team {
        &self.team_two
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::TeamOne => &self.team_one,
            Side::TeamTwo => &self.team_two,
        }
    }

    pub fn winner(&self) -> Side {
        self.winner
    }

    pub fn winning_team(&self) -> &Team {
        self.team(self.winner)
    }

    pub fn losing_team(&self) -> &Team {
        self.team(self.winner.opponent())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn season(&self) -> Option<&SeasonKey> {
        self.season.as_ref()
    }

    pub fn first_set_winner(&self) -> Option<Side> {
        self.first_set_winner
    }

    pub fn mvp(&self) -> Option<&PlayerId> {
        self.mvp.as_ref()
    }

    pub fn scores(&self) -> &[SetScore] {
        &self.scores
    }

    pub fn tie_breaks(&self) -> u32 {
        self.tie_breaks
    }

    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_one
            .players()
            .iter()
            .chain(self.team_two.players().iter())
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.team_one.contains(player_id) || self.team_two.contains(player_id)
    }

    pub fn side_of_player(&self, player_id: &str) -> Option<Side> {
        if self.team_one.contains(player_id) {
            Some(Side::TeamOne)
        } else if self.team_two.contains(player_id) {
            Some(Side::TeamTwo)
        } else {
            None
        }
    }

    pub fn is_won_by(&self, player_id: &str) -> bool {
        self.winning_team().contains(player_id)
    }
}

fn side_of(team_one: &Team, team_two: &Team, team: &Team) -> Option<Side> {
    if team_one.same_players(team) {
        Some(Side::TeamOne)
    } else if team_two.same_players(team) {
        Some(Side::TeamTwo)
    } else {
        None
    }
}

/// Ordered, duplicate-free set of known players
///
/// Roster order is the tie-break for equal ratings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PlayerId>", into = "Vec<PlayerId>")]
pub struct Roster {
    players: Vec<PlayerId>,
}

impl Roster {
    /// Build a roster; blank names are skipped and later duplicates dropped
    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        let mut roster = Self::default();
        for player in players {
            roster.push(player.into());
        }
        roster
    }

    /// Append a player; returns false if blank or already present
    pub fn push(&mut self, player_id: PlayerId) -> bool {
        let player_id = normalize_player_id(player_id);
        if player_id.is_empty() || self.contains(&player_id) {
            return false;
        }
        self.players.push(player_id);
        true
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerId> {
        self.players.iter()
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl From<Vec<PlayerId>> for Roster {
    fn from(players: Vec<PlayerId>) -> Self {
        Self::new(players)
    }
}

impl From<Roster> for Vec<PlayerId> {
    fn from(roster: Roster) -> Self {
        roster.players
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a PlayerId;
    type IntoIter = std::slice::Iter<'a, PlayerId>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

/// A tournament won by a pair; tallied separately from the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWin {
    pub date: NaiveDate,
    pub winners: [PlayerId; 2],
}

impl TournamentWin {
    pub fn new(date: NaiveDate, first: impl Into<PlayerId>, second: impl Into<PlayerId>) -> Self {
        Self {
            date,
            winners: [first.into(), second.into()],
        }
    }
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LadderError::InvalidDate {
            value: value.to_string(),
        }
        .into()
    })
}
