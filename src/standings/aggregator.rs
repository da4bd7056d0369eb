//! Podium and title tallies across all seasons
//!
//! Standings are rebuilt from a season table on every call.

use crate::engine::SeasonTable;
use crate::standings::badges::{title_badge_of, TitleBadge};
use crate::types::{MatchRecord, PlayerId, SeasonKey, TournamentWin};
use crate::utils::percentage;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-player counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StandingsTally {
    pub season_titles: u32,
    pub runner_ups: u32,
    pub thirds: u32,
    pub tournament_titles: u32,
}

impl StandingsTally {
    /// League and tournament titles added together
    pub fn total_titles(&self) -> u32 {
        self.season_titles + self.tournament_titles
    }

    pub fn podiums_without_title(&self) -> u32 {
        self.runner_ups + self.thirds
    }

    pub fn banner(&self) -> TitleBadge {
        title_badge_of(self.total_titles(), self.podiums_without_title())
    }
}

/// Top-ranked player of one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonChampion {
    pub season: SeasonKey,
    pub player_id: PlayerId,
    pub rating_value: f64,
    pub matches_played: u32,
    pub matches_won: u32,
    /// Over the whole season, computed after the fact
    pub win_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Standings {
    pub tallies: BTreeMap<PlayerId, StandingsTally>,
    /// One entry per season, in season order
    pub champions: Vec<SeasonChampion>,
}

impl Standings {
    pub fn tally(&self, player_id: &str) -> StandingsTally {
        self.tallies.get(player_id).copied().unwrap_or_default()
    }

    pub fn champion_of(&self, season: &SeasonKey) -> Option<&SeasonChampion> {
        self.champions.iter().find(|c| &c.season == season)
    }

    /// Add tournament titles on top of the league tallies
    pub fn with_tournaments(mut self, tournaments: &[TournamentWin]) -> Self {
        for (player_id, titles) in tally_tournaments(tournaments) {
            self.tallies.entry(player_id).or_default().tournament_titles += titles;
        }
        self
    }
}

/// Podium counters and champions for every season in `table`
///
/// `matches` must be the history the table was computed from, since
/// champion win rates are looked up by history index.
pub fn compute_standings(table: &SeasonTable, matches: &[MatchRecord]) -> Standings {
    let mut standings = Standings::default();

    for replay in table.seasons() {
        let podium = replay.ranking.podium();
        for (place, entry) in podium.iter().enumerate() {
            let tally = standings.tallies.entry(entry.player_id.clone()).or_default();
            match place {
                0 => tally.season_titles += 1,
                1 => tally.runner_ups += 1,
                _ => tally.thirds += 1,
            }
        }

        if let Some(champion) = replay.ranking.champion() {
            let season_matches = replay
                .match_indices
                .iter()
                .filter_map(|&index| matches.get(index))
                .filter(|m| m.involves(&champion.player_id));

            let (mut played, mut won) = (0u32, 0u32);
            for record in season_matches {
                played += 1;
                if record.is_won_by(&champion.player_id) {
                    won += 1;
                }
            }

            standings.champions.push(SeasonChampion {
                season: replay.season().clone(),
                player_id: champion.player_id.clone(),
                rating_value: champion.value,
                matches_played: played,
                matches_won: won,
                win_percentage: percentage(won, played),
            });
        }
    }

    debug!(
        "Aggregated standings over {} seasons for {} players",
        standings.champions.len(),
        standings.tallies.len()
    );
    standings
}

/// Tournament titles per player; each winner of a pair gets one
pub fn tally_tournaments(tournaments: &[TournamentWin]) -> BTreeMap<PlayerId, u32> {
    let mut titles = BTreeMap::new();
    for win in tournaments {
        for player_id in &win.winners {
            *titles.entry(player_id.clone()).or_insert(0) += 1;
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_all_season_rankings;
    use crate::rating::model::tests::StepModel;
    use crate::season::calendar::PeriodCalendar;
    use crate::types::{parse_date, Roster, Team};

    fn record(one: (&str, &str), two: (&str, &str), one_wins: bool, date: &str) -> MatchRecord {
        let one = Team::new(one.0, one.1).unwrap();
        let two = Team::new(two.0, two.1).unwrap();
        let winner = if one_wins { one.clone() } else { two.clone() };
        MatchRecord::new(one, two, &winner, parse_date(date).unwrap()).unwrap()
    }

    fn standings_for(roster: &Roster, matches: &[MatchRecord]) -> Standings {
        let table =
            compute_all_season_rankings(&StepModel, roster, matches, &PeriodCalendar::default())
                .unwrap();
        compute_standings(&table, matches)
    }

    #[test]
    fn test_one_counter_per_podium_place_per_season() {
        let roster = Roster::new(["A", "B", "C", "D", "E"]);
        let matches = vec![
            record(("A", "B"), ("C", "D"), true, "2025-02-01"),
            record(("A", "C"), ("B", "D"), true, "2025-03-01"),
            record(("C", "D"), ("A", "E"), true, "2025-08-01"),
        ];

        let standings = standings_for(&roster, &matches);

        let total = standings
            .tallies
            .values()
            .fold(StandingsTally::default(), |acc, t| StandingsTally {
                season_titles: acc.season_titles + t.season_titles,
                runner_ups: acc.runner_ups + t.runner_ups,
                thirds: acc.thirds + t.thirds,
                tournament_titles: 0,
            });
        assert_eq!(total.season_titles, 2);
        assert_eq!(total.runner_ups, 2);
        assert_eq!(total.thirds, 2);

        // Season 1: A is 12, B and C are 10; B precedes C in the roster
        assert_eq!(standings.tally("A").season_titles, 1);
        assert_eq!(standings.tally("B").runner_ups, 1);
        assert_eq!(standings.tally("C").thirds, 1);
        // Season 2: C and D win once, B stays at the prior ahead of A
        assert_eq!(standings.tally("C").season_titles, 1);
        assert_eq!(standings.tally("D").runner_ups, 1);
        assert_eq!(standings.tally("B").thirds, 1);
    }

    #[test]
    fn test_champion_win_rate_is_retrospective() {
        let roster = Roster::new(["A", "B", "C", "D"]);
        let matches = vec![
            record(("A", "B"), ("C", "D"), false, "2025-01-10"),
            record(("A", "B"), ("C", "D"), true, "2025-01-11"),
            record(("A", "C"), ("B", "D"), true, "2025-01-12"),
            record(("A", "D"), ("B", "C"), true, "2025-01-13"),
            record(("A", "B"), ("C", "D"), true, "2024-06-01"),
        ];

        let standings = standings_for(&roster, &matches);
        let champion = standings.champion_of(&SeasonKey::new("Season 1")).unwrap();

        assert_eq!(champion.player_id, "A");
        assert_eq!(champion.matches_played, 4);
        assert_eq!(champion.matches_won, 3);
        assert_eq!(champion.win_percentage, 75.0);
        assert_eq!(standings.champions.len(), 2);
        assert_eq!(standings.champions[0].season.as_str(), "Season 0");
    }

    #[test]
    fn test_champion_without_matches_has_zero_rate() {
        let roster = Roster::new(["Z", "A", "B", "C", "D"]);
        let matches = vec![
            record(("A", "B"), ("C", "D"), true, "2025-01-10"),
            record(("A", "B"), ("C", "D"), false, "2025-01-11"),
        ];

        let standings = standings_for(&roster, &matches);
        let champion = &standings.champions[0];

        assert_eq!(champion.player_id, "Z");
        assert_eq!(champion.matches_played, 0);
        assert_eq!(champion.win_percentage, 0.0);
    }

    #[test]
    fn test_empty_history_awards_nothing() {
        let standings = compute_standings(&SeasonTable::default(), &[]);
        assert!(standings.tallies.is_empty());

        let standings = standings_for(&Roster::new(["A", "B"]), &[]);
        assert!(standings.champions.is_empty());
    }

    #[test]
    fn test_tournament_titles_add_to_banner() {
        let date = parse_date("2025-05-05").unwrap();
        let tournaments = vec![
            TournamentWin::new(date, "A", "B"),
            TournamentWin::new(date, "A", "C"),
        ];

        let standings = Standings::default().with_tournaments(&tournaments);

        assert_eq!(standings.tally("A").tournament_titles, 2);
        assert_eq!(standings.tally("C").tournament_titles, 1);
        assert_eq!(standings.tally("A").banner(), TitleBadge::MultiChampion);
        assert_eq!(
            standings.tally("Q").banner(),
            TitleBadge::Unproven { podiums: 0 }
        );
    }

    #[test]
    fn test_banner_counts_podiums_without_title() {
        let tally = StandingsTally {
            season_titles: 0,
            runner_ups: 2,
            thirds: 1,
            tournament_titles: 0,
        };
        assert_eq!(tally.banner().to_string(), "No titles, but 3 podiums");
    }
}
