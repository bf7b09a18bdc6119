//! The result of one enumeration and the presence sets that build it.

use std::collections::HashSet;
use std::fmt;

use super::scope::Interrupt;
use crate::source::FetchError;

/// Why an enumeration ended before the source was exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    DeadlineExceeded,
    /// A page after the first one failed to load.
    FetchFailed(FetchError),
    /// This many tasks panicked; their records may be missing.
    WorkerPanicked(usize),
}

impl From<Interrupt> for StopReason {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Cancelled => StopReason::Cancelled,
            Interrupt::DeadlineExceeded => StopReason::DeadlineExceeded,
        }
    }
}

impl From<FetchError> for StopReason {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Cancelled => StopReason::Cancelled,
            FetchError::DeadlineExceeded => StopReason::DeadlineExceeded,
            other => StopReason::FetchFailed(other),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            StopReason::FetchFailed(err) => write!(f, "fetch failed: {}", err),
            StopReason::WorkerPanicked(1) => write!(f, "1 worker panicked"),
            StopReason::WorkerPanicked(n) => write!(f, "{} workers panicked", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Every record of the source was seen.
    Exhausted,
    /// Enumeration stopped early; the items are a subset of the full set.
    Stopped(StopReason),
}

/// Distinct item identifiers plus whether the enumeration was exhaustive.
///
/// A successful return with `Completion::Stopped` is a partial result:
/// callers must check [`Collection::is_complete`] before treating the items
/// as the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub items: Vec<String>,
    pub completion: Completion,
}

impl Collection {
    pub fn complete(items: Vec<String>) -> Self {
        Self {
            items,
            completion: Completion::Exhausted,
        }
    }

    pub fn partial(items: Vec<String>, reason: StopReason) -> Self {
        Self {
            items,
            completion: Completion::Stopped(reason),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Exhausted)
    }

    pub fn stop_reason(&self) -> Option<&StopReason> {
        match &self.completion {
            Completion::Exhausted => None,
            Completion::Stopped(reason) => Some(reason),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Presence set that remembers first-seen order.
#[derive(Debug, Default)]
pub struct OrderedItemSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` unless it is empty or already present.
    pub fn insert(&mut self, item: &str) -> bool {
        if item.is_empty() || self.seen.contains(item) {
            return false;
        }
        self.seen.insert(item.to_string());
        self.items.push(item.to_string());
        true
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Presence set with no ordering, owned by a single aggregator.
#[derive(Debug, Default)]
pub struct ItemSet {
    seen: HashSet<String>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: String) -> bool {
        if item.is_empty() {
            return false;
        }
        self.seen.insert(item)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn into_items(self) -> Vec<String> {
        self.seen.into_iter().collect()
    }
}
