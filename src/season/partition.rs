//! Grouping a match history into seasons
//!
//! Matches keep a reference to their position in the original history so
//! rating deltas can be looked up by that position after the replay sorts
//! them by date.

use crate::season::calendar::SeasonCalendar;
use crate::types::{MatchRecord, SeasonKey};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A match together with its index in the unsorted history
#[derive(Debug, Clone, Copy)]
pub struct IndexedMatch<'a> {
    pub index: usize,
    pub record: &'a MatchRecord,
}

/// All matches of one season, in history order
#[derive(Debug, Clone)]
pub struct SeasonBucket<'a> {
    pub season: SeasonKey,
    pub matches: Vec<IndexedMatch<'a>>,
}

/// Seasons in their total order
#[derive(Debug, Clone, Default)]
pub struct SeasonPartition<'a> {
    buckets: Vec<SeasonBucket<'a>>,
}

impl<'a> SeasonPartition<'a> {
    pub fn seasons(&self) -> impl Iterator<Item = &SeasonKey> {
        self.buckets.iter().map(|b| &b.season)
    }

    pub fn get(&self, season: &SeasonKey) -> Option<&SeasonBucket<'a>> {
        self.buckets.iter().find(|b| &b.season == season)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeasonBucket<'a>> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<'a> IntoIterator for SeasonPartition<'a> {
    type Item = SeasonBucket<'a>;
    type IntoIter = std::vec::IntoIter<SeasonBucket<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// Position class of a season key in the season order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SeasonClass {
    Legacy,
    Numbered(u64),
    Unrecognized,
}

fn classify(key: &SeasonKey, legacy: Option<&SeasonKey>) -> SeasonClass {
    if legacy == Some(key) {
        return SeasonClass::Legacy;
    }
    match key.ordinal() {
        Some(n) => SeasonClass::Numbered(n),
        None => SeasonClass::Unrecognized,
    }
}

/// Total order on season keys
///
/// The legacy key comes first, then keys by their embedded number, then
/// keys without a number. Equal classes fall back to the key text.
pub fn compare_seasons(a: &SeasonKey, b: &SeasonKey, legacy: Option<&SeasonKey>) -> Ordering {
    classify(a, legacy)
        .cmp(&classify(b, legacy))
        .then_with(|| a.cmp(b))
}

/// Sort season keys in place using [`compare_seasons`]
pub fn sort_seasons(keys: &mut [SeasonKey], legacy: Option<&SeasonKey>) {
    keys.sort_by(|a, b| compare_seasons(a, b, legacy));
}

/// Groups match histories by season
pub struct SeasonPartitioner<'c> {
    calendar: &'c dyn SeasonCalendar,
}

impl<'c> SeasonPartitioner<'c> {
    pub fn new(calendar: &'c dyn SeasonCalendar) -> Self {
        Self { calendar }
    }

    /// Season of a record: its stored key, else the calendar's answer
    pub fn season_of(&self, record: &MatchRecord) -> SeasonKey {
        record
            .season()
            .cloned()
            .unwrap_or_else(|| self.calendar.season_of(record.date()))
    }

    pub fn partition<'a>(&self, matches: &'a [MatchRecord]) -> SeasonPartition<'a> {
        let mut grouped: HashMap<SeasonKey, Vec<IndexedMatch<'a>>> = HashMap::new();
        for (index, record) in matches.iter().enumerate() {
            grouped
                .entry(self.season_of(record))
                .or_default()
                .push(IndexedMatch { index, record });
        }

        let legacy = self.calendar.legacy_key();
        let mut buckets: Vec<SeasonBucket<'a>> = grouped
            .into_iter()
            .map(|(season, matches)| SeasonBucket { season, matches })
            .collect();
        buckets.sort_by(|a, b| compare_seasons(&a.season, &b.season, legacy.as_ref()));

        SeasonPartition { buckets }
    }
}
