//! Instrumented sources for collector tests.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{FetchError, PagedRecords, RecordSource};
use crate::core::{ContinuationToken, Record, RecordPage, Scope};

/// `n` records, each referencing one distinct image.
pub fn numbered_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record::new("default", format!("pod-{}", i), vec![format!("app-{}:v1", i)]))
        .collect()
}

pub fn record(items: &[&str]) -> Record {
    Record::new(
        "default",
        "pod",
        items.iter().map(|item| item.to_string()).collect(),
    )
}

/// Wraps `PagedRecords`, counting fetches and optionally failing one.
#[derive(Debug, Default)]
pub struct MockSource {
    records: PagedRecords,
    fetches: AtomicUsize,
    fail_on_fetch: Option<usize>,
    tokens: Mutex<Vec<ContinuationToken>>,
}

impl MockSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: PagedRecords::new(records),
            ..Default::default()
        }
    }

    /// Make the `n`th fetch (1-based) fail with a transport error.
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_fetch = Some(n);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Continuation tokens returned so far, in order.
    pub fn returned_tokens(&self) -> Vec<ContinuationToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for MockSource {
    async fn fetch(
        &self,
        _scope: &Scope,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_fetch == Some(n) {
            return Err(FetchError::Transport(format!("fetch {} failed", n)));
        }

        let page = self.records.page(page_size, continuation)?;
        self.tokens.lock().unwrap().push(page.continuation.clone());
        Ok(page)
    }
}
