//! Main entry point for the season ladder
//!
//! Loads the roster, match history and tournament winners from a data
//! directory and prints season rankings, champions, match deltas and
//! player statistics as plain text tables.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use season_ladder::config::AppConfig;
use season_ladder::engine::LadderEngine;
use season_ladder::source::{load_all, FileDataSource, LadderData};
use season_ladder::standings::{
    compute_statistics, pair_table, player_insights, skill_tier_of, HeadToHead,
};
use season_ladder::SeasonKey;
use std::path::PathBuf;
use tracing::info;

/// Season Ladder - TrueSkill doubles rankings by season
#[derive(Parser)]
#[command(
    name = "season-ladder",
    version,
    about = "Season-partitioned TrueSkill rankings for a doubles ladder",
    long_about = "Season Ladder replays a recorded history of two-versus-two matches season by \
                 season from a fresh TrueSkill prior and reports rankings, champions, podium \
                 tallies and per-player statistics."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Directory holding players.json and the CSV files")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without reading data")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ranking of every season
    Rankings,
    /// Champion of every season and the podium tallies
    Champions,
    /// Recorded matches with their rating deltas
    Matches {
        #[arg(long, value_name = "PLAYER")]
        player: Option<String>,
    },
    /// Per-player statistics, optionally for one season
    Stats {
        #[arg(long, value_name = "SEASON")]
        season: Option<String>,
    },
    /// Partner and opponent records of one player
    Insights {
        #[arg(long, value_name = "PLAYER")]
        player: String,
    },
    /// All-time rating trajectory and pair records
    History,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(data_dir) = &args.data_dir {
        config.data.data_dir = data_dir.clone();
    }

    season_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn print_rankings(engine: &LadderEngine, data: &LadderData) -> Result<()> {
    let table = engine.season_table(&data.roster, &data.matches)?;
    if table.is_empty() {
        println!("No matches recorded");
        return Ok(());
    }

    for replay in table.seasons() {
        println!("== {} ({} matches) ==", replay.season(), replay.match_indices.len());
        println!("{:>3}  {:<16} {:>8} {:>8} {:>8}  {}", "#", "Player", "Value", "Mean", "Sigma", "Tier");
        for (position, entry) in replay.ranking.entries().iter().enumerate() {
            println!(
                "{:>3}  {:<16} {:>8.2} {:>8.2} {:>8.2}  {}",
                position + 1,
                entry.player_id,
                entry.value,
                entry.rating.mean,
                entry.rating.uncertainty,
                skill_tier_of(entry.value)
            );
        }
        println!();
    }
    Ok(())
}

fn print_champions(engine: &LadderEngine, data: &LadderData) -> Result<()> {
    let (_, standings) = engine.standings(&data.roster, &data.matches, &data.tournaments)?;

    println!("{:<12} {:<16} {:>8} {:>8}", "Season", "Champion", "Value", "Win %");
    for champion in &standings.champions {
        println!(
            "{:<12} {:<16} {:>8.2} {:>7.1}%",
            champion.season.as_str(),
            champion.player_id,
            champion.rating_value,
            champion.win_percentage
        );
    }

    println!();
    println!(
        "{:<16} {:>6} {:>6} {:>6} {:>6}  {}",
        "Player", "Titles", "2nd", "3rd", "Cups", "Banner"
    );
    for player_id in &data.roster {
        let tally = standings.tally(player_id);
        println!(
            "{:<16} {:>6} {:>6} {:>6} {:>6}  {}",
            player_id,
            tally.season_titles,
            tally.runner_ups,
            tally.thirds,
            tally.tournament_titles,
            tally.banner()
        );
    }
    Ok(())
}

fn print_matches(engine: &LadderEngine, data: &LadderData, player: Option<&str>) -> Result<()> {
    let table = engine.season_table(&data.roster, &data.matches)?;

    for replay in table.seasons() {
        for &index in replay.match_indices.iter().rev() {
            let Some(record) = data.matches.get(index) else {
                continue;
            };
            if player.is_some_and(|p| !record.involves(p)) {
                continue;
            }

            let scores: Vec<String> = record.scores().iter().map(|s| s.to_string()).collect();
            let deltas: Vec<String> = record
                .players()
                .map(|p| {
                    let delta = table.delta_for_player(index, p).unwrap_or(0.0);
                    format!("{} {:+.2}", p, delta)
                })
                .collect();
            println!(
                "{} [{}] {} def. {}  {}  ({})",
                record.date(),
                replay.season(),
                record.winning_team(),
                record.losing_team(),
                scores.join(" "),
                deltas.join(", ")
            );
        }
    }
    Ok(())
}

fn print_stats(engine: &LadderEngine, data: &LadderData, season: Option<&str>) -> Result<()> {
    let stats = match season {
        Some(season) => {
            let key = SeasonKey::new(season);
            let partition = engine.partition(&data.matches);
            let Some(bucket) = partition.get(&key) else {
                bail!("No matches recorded for {}", key);
            };
            compute_statistics(&data.roster, bucket.matches.iter().map(|m| m.record))
        }
        None => compute_statistics(&data.roster, &data.matches),
    };

    println!(
        "{:<16} {:>4} {:>4} {:>7} {:>4} {:>5} {:>5} {:>4} {:>7} {:>5}",
        "Player", "P", "W", "Win %", "MVP", "Sets", "Won", "TB", "1st %", "Diff"
    );
    for row in &stats {
        println!(
            "{:<16} {:>4} {:>4} {:>6.1}% {:>4} {:>5} {:>5} {:>4} {:>6.1}% {:>+5}",
            row.player_id,
            row.matches_played,
            row.wins,
            row.win_percentage(),
            row.mvp_awards,
            row.sets_played,
            row.sets_won,
            row.tie_breaks,
            row.first_set_percentage(),
            row.games_difference()
        );
    }
    Ok(())
}

fn describe(label: &str, entry: Option<&HeadToHead>, value: impl Fn(&HeadToHead) -> String) {
    match entry {
        Some(entry) => println!("  {:<24} {} ({})", label, entry.player_id, value(entry)),
        None => println!("  {:<24} N/A", label),
    }
}

fn print_insights(data: &LadderData, player: &str) -> Result<()> {
    let Some(insights) = player_insights(player, &data.matches) else {
        println!("{} has no recorded matches", player);
        return Ok(());
    };

    println!("{}", insights.player_id);
    describe("Most frequent partner", insights.most_frequent_partner(), |h| {
        format!("{} matches", h.meetings())
    });
    describe("Best partner", insights.best_partner(), |h| {
        format!("{:.0}% wins", h.win_ratio() * 100.0)
    });
    describe("Worst partner", insights.worst_partner(), |h| {
        format!("{:.0}% wins", h.win_ratio() * 100.0)
    });
    describe("Toughest opponent", insights.toughest_opponent(), |h| {
        format!("won {} times", h.wins)
    });
    describe("Easiest opponent", insights.easiest_opponent(), |h| {
        format!("lost {} times", h.losses)
    });
    describe("Arch-rival", insights.arch_rival(), |h| {
        format!("{} meetings", h.meetings())
    });
    Ok(())
}

fn print_history(engine: &LadderEngine, data: &LadderData) -> Result<()> {
    let history = engine.cumulative_history(&data.roster, &data.matches)?;

    println!("{:<16} {:>8} {:>8} {:>8}", "Player", "Start", "Current", "Peak");
    for (player_id, points) in &history.series {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            continue;
        };
        let peak = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        println!(
            "{:<16} {:>8.2} {:>8.2} {:>8.2}",
            player_id, first.value, last.value, peak
        );
    }

    println!();
    println!("{:<24} {:>7} {:>7}", "Pair", "Matches", "Win %");
    for pair in pair_table(&data.roster, &data.matches)
        .iter()
        .filter(|p| p.matches > 0)
    {
        println!(
            "{:<24} {:>7} {:>6.1}%",
            format!("{} & {}", pair.players[0], pair.players[1]),
            pair.matches,
            pair.win_ratio() * 100.0
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let engine = LadderEngine::from_config(&config)?;

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Model: {}", engine.model().config());
        info!("Data directory: {}", config.data.data_dir.display());
        return Ok(());
    }

    let source = FileDataSource::from_settings(&config.data);
    let data = load_all(&source)?;
    info!(
        "Loaded {} players, {} matches, {} tournaments",
        data.roster.len(),
        data.matches.len(),
        data.tournaments.len()
    );

    match args.command.unwrap_or(Command::Rankings) {
        Command::Rankings => print_rankings(&engine, &data),
        Command::Champions => print_champions(&engine, &data),
        Command::Matches { player } => print_matches(&engine, &data, player.as_deref()),
        Command::Stats { season } => print_stats(&engine, &data, season.as_deref()),
        Command::Insights { player } => print_insights(&data, &player),
        Command::History => print_history(&engine, &data),
    }
}
