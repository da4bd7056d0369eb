//! Shared builders for integration and property tests

#![allow(dead_code)]

use proptest::prelude::*;
use season_ladder::types::{parse_date, MatchRecord, Roster, Team};
use std::fs;
use std::path::Path;

pub const PLAYERS: [&str; 6] = ["Ane", "Ibai", "Jon", "Maite", "Uxue", "Xabi"];

pub fn roster() -> Roster {
    Roster::new(PLAYERS)
}

/// Team one against team two; `one_wins` picks the winner
pub fn match_on(one: (&str, &str), two: (&str, &str), one_wins: bool, date: &str) -> MatchRecord {
    let one = Team::new(one.0, one.1).unwrap();
    let two = Team::new(two.0, two.1).unwrap();
    let winner = if one_wins { one.clone() } else { two.clone() };
    MatchRecord::new(one, two, &winner, parse_date(date).unwrap()).unwrap()
}

/// Three seasons of play, deliberately out of date order
pub fn league_history() -> Vec<MatchRecord> {
    vec![
        match_on(("Ane", "Ibai"), ("Jon", "Maite"), true, "2025-02-10"),
        match_on(("Ane", "Jon"), ("Ibai", "Uxue"), true, "2024-10-05"),
        match_on(("Xabi", "Maite"), ("Ane", "Uxue"), false, "2025-03-01"),
        match_on(("Jon", "Xabi"), ("Ibai", "Maite"), true, "2025-09-14"),
        match_on(("Ane", "Ibai"), ("Jon", "Maite"), false, "2025-02-10"),
        match_on(("Uxue", "Xabi"), ("Ane", "Jon"), true, "2025-10-01"),
        match_on(("Ibai", "Uxue"), ("Maite", "Xabi"), true, "2024-11-11"),
    ]
}

pub const MATCHES_HEADER: &str = "team1_player1,team1_player2,team2_player1,team2_player2,\
first_set_winner1,first_set_winner2,winner1,winner2,mvp,scores,tie_breaks,venue,date,season";

/// Write a small data directory for the file-backed source
///
/// The last match row names the same player twice and must be skipped.
pub fn write_data_dir(dir: &Path) {
    fs::write(
        dir.join("players.json"),
        r#"["Xabi", "Ane", "Jon", "Ibai", "Maite", "Uxue"]"#,
    )
    .unwrap();

    let rows = [
        "Ane,Ibai,Jon,Maite,Ane,Ibai,Ane,Ibai,Ibai,6-3;6-4,,Ibaiondo,2025-02-10,",
        "Ane,Jon,Ibai,Uxue,Ibai,Uxue,Jon,Ane,Jon,4-6;7-6(3);6-2,,Bakh,2024-10-05,",
        "Xabi,Maite,Ane,Uxue,Ane,Uxue,Ane,Uxue,Uxue,3-6;2-6,,Bakh,2025-03-01,",
        "Jon,Xabi,Ibai,Maite,Jon,Xabi,Xabi,Jon,Xabi,6-1;6-0,,Otro,2025-09-14,Season 2",
        "Ane,Ane,Jon,Maite,,,Ane,Ane,,,,,2025-02-11,",
    ];
    fs::write(
        dir.join("matches.csv"),
        format!("{}\n{}\n", MATCHES_HEADER, rows.join("\n")),
    )
    .unwrap();

    fs::write(
        dir.join("tournaments.csv"),
        "date,winner1,winner2\n2025-05-01,Ane,Ibai\n2025-11-20,Ane,Xabi\n",
    )
    .unwrap();
}

/// A random match among the fixture players in the first half of `year`,
/// so every match generated for one year lands in the same season
pub fn arb_match(year: i32) -> impl Strategy<Value = MatchRecord> {
    (
        Just(PLAYERS.to_vec()).prop_shuffle(),
        any::<bool>(),
        1u32..=6,
        1u32..=28,
    )
        .prop_map(move |(players, one_wins, month, day)| {
            let date = format!("{}-{:02}-{:02}", year, month, day);
            match_on(
                (players[0], players[1]),
                (players[2], players[3]),
                one_wins,
                &date,
            )
        })
}

/// Up to `max` random matches in the first half of `year`
pub fn arb_season(year: i32, max: usize) -> impl Strategy<Value = Vec<MatchRecord>> {
    prop::collection::vec(arb_match(year), 0..=max)
}
