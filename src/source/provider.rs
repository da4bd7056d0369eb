//! Provider traits and the in-memory implementation

use crate::error::Result;
use crate::types::{MatchRecord, Roster, TournamentWin};

/// Supplies the ordered set of known players
pub trait RosterProvider: Send + Sync {
    fn load_roster(&self) -> Result<Roster>;
}

/// Supplies the recorded matches in history order
pub trait MatchHistoryProvider: Send + Sync {
    fn load_matches(&self) -> Result<Vec<MatchRecord>>;
}

/// Supplies tournament winners
pub trait TournamentProvider: Send + Sync {
    fn load_tournaments(&self) -> Result<Vec<TournamentWin>>;
}

/// Everything one computation pass needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LadderData {
    pub roster: Roster,
    pub matches: Vec<MatchRecord>,
    pub tournaments: Vec<TournamentWin>,
}

/// Load all three inputs from a single source
pub fn load_all<S>(source: &S) -> Result<LadderData>
where
    S: RosterProvider + MatchHistoryProvider + TournamentProvider + ?Sized,
{
    Ok(LadderData {
        roster: source.load_roster()?,
        matches: source.load_matches()?,
        tournaments: source.load_tournaments()?,
    })
}

/// In-memory source, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    data: LadderData,
}

impl StaticDataSource {
    pub fn new(roster: Roster, matches: Vec<MatchRecord>) -> Self {
        Self {
            data: LadderData {
                roster,
                matches,
                tournaments: Vec::new(),
            },
        }
    }

    pub fn with_tournaments(mut self, tournaments: Vec<TournamentWin>) -> Self {
        self.data.tournaments = tournaments;
        self
    }

    pub fn push_match(&mut self, record: MatchRecord) {
        self.data.matches.push(record);
    }
}

impl RosterProvider for StaticDataSource {
    fn load_roster(&self) -> Result<Roster> {
        Ok(self.data.roster.clone())
    }
}

impl MatchHistoryProvider for StaticDataSource {
    fn load_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.data.matches.clone())
    }
}

impl TournamentProvider for StaticDataSource {
    fn load_tournaments(&self) -> Result<Vec<TournamentWin>> {
        Ok(self.data.tournaments.clone())
    }
}
