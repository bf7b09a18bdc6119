//! Collection strategies.
//!
//! All three return the same set of items for the same records; they differ
//! in memory use, ordering and how they react to the scope ending.
//!
//! | strategy     | memory            | order        | scope ends              |
//! |--------------|-------------------|--------------|-------------------------|
//! | `sequential` | whole list        | first-seen   | error                   |
//! | `streaming`  | one record        | none         | partial, flagged        |
//! | `fan-out`    | whole list        | none         | only bounds the fetch   |

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Collection, ContinuationToken, Record, Scope};
use crate::source::{FetchError, RecordSource};

pub mod fan_out;
pub mod sequential;
pub mod streaming;

pub use streaming::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One unbounded fetch, then an ordered scan
    #[default]
    Sequential,
    /// Paginated producer feeding a consumer through a bounded queue
    Streaming,
    /// Bounded worker pool over the fully fetched record list
    FanOut,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Streaming => "streaming",
            Strategy::FanOut => "fan-out",
        }
    }
}

/// Worker count used when none is configured.
pub fn default_concurrency() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Runs one strategy against a source.
#[derive(Debug, Clone)]
pub struct Collector {
    pub strategy: Strategy,
    /// Page size for the streaming strategy.
    pub page_size: NonZeroUsize,
    /// Worker count for the fan-out strategy.
    pub concurrency: NonZeroUsize,
}

impl Default for Collector {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            concurrency: default_concurrency(),
        }
    }
}

impl Collector {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub async fn collect<S>(&self, source: Arc<S>, scope: &Scope) -> Result<Collection, FetchError>
    where
        S: RecordSource + ?Sized + 'static,
    {
        let collection = match self.strategy {
            Strategy::Sequential => sequential::collect(source.as_ref(), scope).await?,
            Strategy::Streaming => streaming::collect(source, scope, self.page_size).await?,
            Strategy::FanOut => {
                let records = fetch_all(source.as_ref(), scope).await?;
                fan_out::collect(records, self.concurrency).await
            }
        };

        info!(
            strategy = self.strategy.as_str(),
            items = collection.len(),
            complete = collection.is_complete(),
            "collection finished"
        );
        Ok(collection)
    }
}

/// Materializes every record of `source` under the scope.
///
/// Asks for everything in one page, but keeps following continuation
/// tokens for sources that cap their page size.
pub async fn fetch_all<S>(source: &S, scope: &Scope) -> Result<Vec<Record>, FetchError>
where
    S: RecordSource + ?Sized,
{
    let mut records = Vec::new();
    let mut token = ContinuationToken::start();
    loop {
        let page = scope.run(source.fetch(scope, None, &token)).await??;
        records.extend(page.records);
        if page.continuation.is_empty() {
            return Ok(records);
        }
        token = page.continuation;
    }
}
