//! Performance benchmarks for season replay and aggregation

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use season_ladder::engine::LadderEngine;
use season_ladder::rating::{RatingModel, TrueSkillModel};
use season_ladder::standings::compute_statistics;
use season_ladder::types::{MatchRecord, PlayerRating, Roster, Team};

fn bench_roster(size: usize) -> Roster {
    Roster::new((0..size).map(|i| format!("player{}", i)))
}

/// Rotating pairings spread one match per day from 2024-01-01
fn bench_history(roster: &Roster, matches: usize) -> Vec<MatchRecord> {
    let players = roster.as_slice();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    (0..matches)
        .map(|i| {
            let pick = |offset: usize| players[(i * 3 + offset * 5) % players.len()].clone();
            let one = Team::new(pick(0), pick(1)).unwrap();
            let two = Team::new(pick(2), pick(3)).unwrap();
            let winner = if i % 3 == 0 { two.clone() } else { one.clone() };
            MatchRecord::new(one, two, &winner, start + Duration::days(i as i64)).unwrap()
        })
        .collect()
}

fn bench_single_match(c: &mut Criterion) {
    let model = TrueSkillModel::default();
    let prior = model.create_prior();
    let stronger = PlayerRating {
        mean: 30.0,
        uncertainty: 4.0,
    };

    c.bench_function("trueskill_two_teams_2v2", |b| {
        b.iter(|| {
            let result = model.rate_teams(
                black_box([prior, stronger]),
                black_box([prior, prior]),
                season_ladder::Side::TeamTwo,
            );
            black_box(result)
        })
    });
}

fn bench_season_table(c: &mut Criterion) {
    let engine = LadderEngine::default();
    let roster = bench_roster(16);
    let mut group = c.benchmark_group("season_table");

    for matches in [100usize, 500, 2000] {
        let history = bench_history(&roster, matches);
        group.bench_with_input(BenchmarkId::from_parameter(matches), &history, |b, history| {
            b.iter(|| black_box(engine.season_table(&roster, history).unwrap()))
        });
    }
    group.finish();
}

fn bench_standings(c: &mut Criterion) {
    let engine = LadderEngine::default();
    let roster = bench_roster(16);
    let history = bench_history(&roster, 1000);

    c.bench_function("standings_1000_matches", |b| {
        b.iter(|| black_box(engine.standings(&roster, &history, &[]).unwrap()))
    });

    c.bench_function("statistics_1000_matches", |b| {
        b.iter(|| black_box(compute_statistics(&roster, &history)))
    });
}

criterion_group!(
    benches,
    bench_single_match,
    bench_season_table,
    bench_standings
);
criterion_main!(benches);
