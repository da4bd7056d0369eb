//! Data sources feeding the ladder
//!
//! The engine only sees a roster, a match history and a tournament list;
//! these adapters produce them from memory or from files on disk.

pub mod files;
pub mod provider;

pub use files::FileDataSource;
pub use provider::{
    load_all, LadderData, MatchHistoryProvider, RosterProvider, StaticDataSource, TournamentProvider,
};
