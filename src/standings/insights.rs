//! Partner and opponent records

use crate::types::{MatchRecord, PlayerId, Roster};
use crate::utils::ratio;
use serde::Serialize;

/// Wins and losses of a player alongside or against one other player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadToHead {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
}

impl HeadToHead {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            wins: 0,
            losses: 0,
        }
    }

    pub fn meetings(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_ratio(&self) -> f64 {
        ratio(self.wins, self.meetings())
    }
}

/// Partner and opponent summary for one player
///
/// Opponent records are from the opponent's point of view: `wins` counts
/// the matches the opponent won against the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerInsights {
    pub player_id: PlayerId,
    /// In first-seen order
    pub partners: Vec<HeadToHead>,
    pub opponents: Vec<HeadToHead>,
}

impl PlayerInsights {
    /// Partner the player has teamed up with most often
    pub fn most_frequent_partner(&self) -> Option<&HeadToHead> {
        first_max_by(&self.partners, |h| h.meetings() as f64)
    }

    pub fn best_partner(&self) -> Option<&HeadToHead> {
        first_max_by(&self.partners, HeadToHead::win_ratio)
    }

    pub fn worst_partner(&self) -> Option<&HeadToHead> {
        first_max_by(&self.partners, |h| -h.win_ratio())
    }

    /// Opponent with the most wins against the player
    pub fn toughest_opponent(&self) -> Option<&HeadToHead> {
        first_max_by(&self.opponents, |h| h.wins as f64)
    }

    /// Opponent with the most losses against the player
    pub fn easiest_opponent(&self) -> Option<&HeadToHead> {
        first_max_by(&self.opponents, |h| h.losses as f64)
    }

    /// Opponent met most often
    pub fn arch_rival(&self) -> Option<&HeadToHead> {
        first_max_by(&self.opponents, |h| h.meetings() as f64)
    }
}

/// Highest scoring entry; ties go to the earliest one
fn first_max_by<F>(entries: &[HeadToHead], score: F) -> Option<&HeadToHead>
where
    F: Fn(&HeadToHead) -> f64,
{
    let mut best: Option<(&HeadToHead, f64)> = None;
    for entry in entries {
        let value = score(entry);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((entry, value)),
        }
    }
    best.map(|(entry, _)| entry)
}

fn entry_for<'a>(records: &'a mut Vec<HeadToHead>, player_id: &PlayerId) -> &'a mut HeadToHead {
    match records.iter().position(|h| &h.player_id == player_id) {
        Some(position) => &mut records[position],
        None => {
            records.push(HeadToHead::new(player_id.clone()));
            let last = records.len() - 1;
            &mut records[last]
        }
    }
}

/// Insights for `player_id`; `None` if the player never played
pub fn player_insights<'a, I>(player_id: &str, matches: I) -> Option<PlayerInsights>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut partners = Vec::new();
    let mut opponents = Vec::new();

    for record in matches {
        let Some(side) = record.side_of_player(player_id) else {
            continue;
        };
        let won = record.winner() == side;

        if let Some(partner) = record.team(side).partner_of(player_id) {
            let entry = entry_for(&mut partners, partner);
            if won {
                entry.wins += 1;
            } else {
                entry.losses += 1;
            }
        }
        for opponent in record.team(side.opponent()).players() {
            let entry = entry_for(&mut opponents, opponent);
            if won {
                entry.losses += 1;
            } else {
                entry.wins += 1;
            }
        }
    }

    if partners.is_empty() {
        return None;
    }
    Some(PlayerInsights {
        player_id: player_id.to_string(),
        partners,
        opponents,
    })
}

/// Record of two roster players playing as a team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRecord {
    pub players: [PlayerId; 2],
    pub matches: u32,
    pub wins: u32,
}

impl PairRecord {
    pub fn win_ratio(&self) -> f64 {
        ratio(self.wins, self.matches)
    }

    fn is(&self, a: &str, b: &str) -> bool {
        let [x, y] = &self.players;
        (x == a && y == b) || (x == b && y == a)
    }
}

/// Every unordered pair of roster players, in roster order
///
/// Pairs that never played together have zero matches. Teams with a player
/// outside the roster are ignored.
pub fn pair_table<'a, I>(roster: &Roster, matches: I) -> Vec<PairRecord>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let players = roster.as_slice();
    let mut pairs: Vec<PairRecord> = players
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            players[i + 1..].iter().map(move |b| PairRecord {
                players: [a.clone(), b.clone()],
                matches: 0,
                wins: 0,
            })
        })
        .collect();

    for record in matches {
        for (team, won) in [(record.winning_team(), true), (record.losing_team(), false)] {
            let [a, b] = team.players();
            if let Some(pair) = pairs.iter_mut().find(|p| p.is(a, b)) {
                pair.matches += 1;
                if won {
                    pair.wins += 1;
                }
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_date, Team};

    fn record(one: (&str, &str), two: (&str, &str), one_wins: bool) -> MatchRecord {
        let one = Team::new(one.0, one.1).unwrap();
        let two = Team::new(two.0, two.1).unwrap();
        let winner = if one_wins { one.clone() } else { two.clone() };
        MatchRecord::new(one, two, &winner, parse_date("2025-03-01").unwrap()).unwrap()
    }

    fn history() -> Vec<MatchRecord> {
        vec![
            record(("A", "B"), ("C", "D"), true),
            record(("A", "B"), ("C", "D"), false),
            record(("A", "C"), ("B", "D"), true),
            record(("D", "B"), ("A", "B2"), false),
            record(("A", "B"), ("C", "E"), true),
        ]
    }

    #[test]
    fn test_partner_records() {
        let matches = history();
        let insights = player_insights("A", &matches).unwrap();

        let partner = insights.most_frequent_partner().unwrap();
        assert_eq!((partner.player_id.as_str(), partner.meetings()), ("B", 3));
        assert_eq!(insights.best_partner().unwrap().player_id, "C");
        assert_eq!(insights.worst_partner().unwrap().player_id, "B");
    }

    #[test]
    fn test_opponent_records() {
        let matches = history();
        let insights = player_insights("A", &matches).unwrap();

        // C and D each beat A once; C was met first
        assert_eq!(insights.toughest_opponent().unwrap().player_id, "C");
        let easiest = insights.easiest_opponent().unwrap();
        assert_eq!((easiest.player_id.as_str(), easiest.losses), ("D", 3));
        let rival = insights.arch_rival().unwrap();
        assert_eq!((rival.player_id.as_str(), rival.meetings()), ("D", 4));
    }

    #[test]
    fn test_no_insights_without_matches() {
        let matches = history();
        assert!(player_insights("Z", &matches).is_none());
        assert!(player_insights("A", &Vec::new()).is_none());
    }

    #[test]
    fn test_pair_table() {
        let roster = Roster::new(["A", "B", "C", "D"]);
        let matches = history();

        let pairs = pair_table(&roster, &matches);

        assert_eq!(pairs.len(), 6);
        let ab = pairs.iter().find(|p| p.is("B", "A")).unwrap();
        assert_eq!((ab.matches, ab.wins), (3, 2));
        let cd = pairs.iter().find(|p| p.is("C", "D")).unwrap();
        assert_eq!((cd.matches, cd.wins), (2, 1));
        assert_eq!(cd.win_ratio(), 0.5);
        let ad = pairs.iter().find(|p| p.is("A", "D")).unwrap();
        assert_eq!(ad.matches, 0);
        assert_eq!(ad.win_ratio(), 0.0);
    }
}
