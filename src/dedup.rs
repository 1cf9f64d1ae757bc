//! Case-insensitive deduplication of subdomain lines
//!
//! The [`Deduplicator`] owns a [`UniqueSet`] and a [`LineFilter`] and is fed
//! one raw line at a time. Lines are normalized before any comparison, so the
//! set only ever holds lowercase entries.

use crate::filter::{normalize, LineFilter, Rejection};
use ahash::RandomState;
use hashbrown::HashSet;

/// What happened to a line passed to [`Deduplicator::ingest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank after trimming
    Blank,
    /// Dropped by a filter rule
    Rejected(Rejection),
    /// Already in the set
    Duplicate,
    /// Newly inserted
    Inserted,
}

/// Counters for deduplication operations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupStats {
    pub blank: u64,
    pub ignored: u64,
    pub filtered: u64,
    pub invalid: u64,
    pub duplicates: u64,
    pub unique: u64,
}

impl DedupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Blank => self.blank += 1,
            Outcome::Rejected(Rejection::Ignored) => self.ignored += 1,
            Outcome::Rejected(Rejection::Filtered) => self.filtered += 1,
            Outcome::Rejected(Rejection::Invalid) => self.invalid += 1,
            Outcome::Duplicate => self.duplicates += 1,
            Outcome::Inserted => self.unique += 1,
        }
    }

    /// Lines dropped by any filter rule
    pub fn rejected(&self) -> u64 {
        self.ignored + self.filtered + self.invalid
    }
}

/// Set of normalized lines
#[derive(Debug, Default)]
pub struct UniqueSet {
    set: HashSet<String, RandomState>,
}

impl UniqueSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Insert an item, returns true if it was not present
    pub fn insert(&mut self, item: String) -> bool {
        self.set.insert(item)
    }

    /// Consume the set, returning its members in byte-wise ascending order
    pub fn into_sorted(self) -> Vec<String> {
        let mut items: Vec<String> = self.set.into_iter().collect();
        items.sort_unstable();
        items
    }
}

/// Single-owner deduplicator: normalize, filter, insert
#[derive(Debug)]
pub struct Deduplicator {
    filter: LineFilter,
    set: UniqueSet,
    stats: DedupStats,
}

impl Deduplicator {
    /// `capacity` pre-sizes the set; it grows past it as needed
    pub fn new(filter: LineFilter, capacity: usize) -> Self {
        Self {
            filter,
            set: UniqueSet::with_capacity(capacity),
            stats: DedupStats::new(),
        }
    }

    /// Feed one raw line
    pub fn ingest(&mut self, line: &str) -> Outcome {
        let outcome = match normalize(line) {
            None => Outcome::Blank,
            Some(lower) => match self.filter.check(&lower) {
                Err(rejection) => Outcome::Rejected(rejection),
                Ok(()) => {
                    if self.set.insert(lower) {
                        Outcome::Inserted
                    } else {
                        Outcome::Duplicate
                    }
                }
            },
        };

        self.stats.record(outcome);
        outcome
    }

    /// Consume the deduplicator, returning the sorted unique lines and the counters
    pub fn finalize(self) -> (Vec<String>, DedupStats) {
        (self.set.into_sorted(), self.stats)
    }
}
