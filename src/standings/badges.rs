//! Cosmetic labels derived from ratings and titles
//!
//! Both classifiers are total: every input maps to exactly one label.

use serde::Serialize;
use std::fmt;

/// Sixteen skill tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SkillTier {
    Ant,
    Cockroach,
    Monkey,
    SeaBream,
    Sheep,
    Hake,
    Cat,
    Raccoon,
    Cobra,
    Fox,
    Tiger,
    GreatWhiteShark,
    Rhino,
    Lion,
    Elephant,
    Dragon,
}

/// Lower bound of every tier above `Ant`, ascending
pub const SKILL_TIER_THRESHOLDS: [f64; 15] = [
    -1.0, -0.5, 0.0, 2.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0,
];

impl SkillTier {
    pub const ALL: [SkillTier; 16] = [
        SkillTier::Ant,
        SkillTier::Cockroach,
        SkillTier::Monkey,
        SkillTier::SeaBream,
        SkillTier::Sheep,
        SkillTier::Hake,
        SkillTier::Cat,
        SkillTier::Raccoon,
        SkillTier::Cobra,
        SkillTier::Fox,
        SkillTier::Tiger,
        SkillTier::GreatWhiteShark,
        SkillTier::Rhino,
        SkillTier::Lion,
        SkillTier::Elephant,
        SkillTier::Dragon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillTier::Ant => "Ant",
            SkillTier::Cockroach => "Cockroach",
            SkillTier::Monkey => "Monkey",
            SkillTier::SeaBream => "Sea Bream",
            SkillTier::Sheep => "Sheep",
            SkillTier::Hake => "Hake",
            SkillTier::Cat => "Cat",
            SkillTier::Raccoon => "Raccoon",
            SkillTier::Cobra => "Cobra",
            SkillTier::Fox => "Fox",
            SkillTier::Tiger => "Tiger",
            SkillTier::GreatWhiteShark => "Great White Shark",
            SkillTier::Rhino => "Rhino",
            SkillTier::Lion => "Lion",
            SkillTier::Elephant => "Elephant",
            SkillTier::Dragon => "Dragon",
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier of a conservative value; NaN falls into the lowest tier
pub fn skill_tier_of(value: f64) -> SkillTier {
    let reached = SKILL_TIER_THRESHOLDS
        .iter()
        .take_while(|bound| value >= **bound)
        .count();
    SkillTier::ALL[reached]
}

/// Banner for a player's combined league and tournament titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TitleBadge {
    /// No titles yet; carries runner-up and third-place finishes
    Unproven { podiums: u32 },
    RookieChampion,
    MultiChampion,
    Treble,
    FakersApprentice,
    Handful,
    Legend,
}

impl fmt::Display for TitleBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleBadge::Unproven { podiums } => {
                write!(f, "No titles, but {} podiums", podiums)
            }
            TitleBadge::RookieChampion => f.write_str("Rookie Champion!"),
            TitleBadge::MultiChampion => f.write_str("Multi-champion"),
            TitleBadge::Treble => f.write_str("Treble"),
            TitleBadge::FakersApprentice => f.write_str("Faker's Apprentice"),
            TitleBadge::Handful => f.write_str("Handful"),
            TitleBadge::Legend => f.write_str("Legend of the game!"),
        }
    }
}

pub fn title_badge_of(total_titles: u32, podiums_without_title: u32) -> TitleBadge {
    match total_titles {
        0 => TitleBadge::Unproven {
            podiums: podiums_without_title,
        },
        1 => TitleBadge::RookieChampion,
        2 => TitleBadge::MultiChampion,
        3 => TitleBadge::Treble,
        4 => TitleBadge::FakersApprentice,
        5 => TitleBadge::Handful,
        _ => TitleBadge::Legend,
    }
}
