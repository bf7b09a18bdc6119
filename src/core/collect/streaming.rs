//! Streaming strategy: a paginating producer feeding a single consumer.
//!
//! ```text
//!   producer task ──fetch page──▶ records ──▶ [handoff queue, cap 1] ──▶ consumer ──▶ ItemSet
//!                  ├── checks the scope before every publish
//!                  └── returning drops the only sender: the queue closes once
//! ```
//!
//! Only one record is in flight between the two sides, so memory stays flat
//! however many pods the cluster has. Failures after the first page, and
//! the scope ending, stop the stream without an error: the caller gets the
//! items seen so far with `Completion::Stopped` saying why.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::core::{
    Collection, Completion, ContinuationToken, ItemSet, Record, RecordPage, Scope, StopReason,
};
use crate::source::{FetchError, RecordSource};

/// Records buffered between producer and consumer.
///
/// tokio has no zero-capacity channel; one slot is the nearest rendezvous.
pub const HANDOFF_CAPACITY: usize = 1;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Streams every page of `source` through a bounded handoff queue.
///
/// Returns `Err` only when the first fetch fails for a reason other than the
/// scope ending.
pub async fn collect<S>(
    source: Arc<S>,
    scope: &Scope,
    page_size: NonZeroUsize,
) -> Result<Collection, FetchError>
where
    S: RecordSource + ?Sized + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Record>(HANDOFF_CAPACITY);
    let producer = tokio::spawn(produce(source, scope.clone(), page_size, tx));

    let mut set = ItemSet::new();
    let mut records = 0usize;
    while let Some(record) = rx.recv().await {
        records += 1;
        for item in record.items {
            set.insert(item);
        }
    }

    let completion = match producer.await {
        Ok(Ok(completion)) => completion,
        Ok(Err(err)) => return Err(err),
        Err(err) => {
            error!(error = %err, "stream producer failed");
            Completion::Stopped(StopReason::WorkerPanicked(1))
        }
    };

    debug!(records, items = set.len(), "stream drained");
    Ok(Collection {
        items: set.into_items(),
        completion,
    })
}

/// Owns pagination and the sending side of the handoff queue.
async fn produce<S>(
    source: Arc<S>,
    scope: Scope,
    page_size: NonZeroUsize,
    tx: mpsc::Sender<Record>,
) -> Result<Completion, FetchError>
where
    S: RecordSource + ?Sized,
{
    let mut token = ContinuationToken::start();
    let mut pages = 0usize;

    loop {
        let RecordPage {
            records,
            continuation,
        } = match source.fetch(&scope, Some(page_size), &token).await {
            Ok(page) => page,
            Err(err) if pages == 0 && !err.is_cancellation() => return Err(err),
            Err(err) => {
                warn!(error = %err, pages, "stopping stream after fetch failure");
                return Ok(Completion::Stopped(err.into()));
            }
        };
        pages += 1;
        debug!(page = pages, records = records.len(), "publishing page");

        for record in records {
            if let Some(interrupt) = scope.interrupt() {
                debug!(%interrupt, pages, "stopping stream");
                return Ok(Completion::Stopped(interrupt.into()));
            }

            tokio::select! {
                biased;
                interrupt = scope.done() => {
                    debug!(%interrupt, pages, "stopping stream while blocked on consumer");
                    return Ok(Completion::Stopped(interrupt.into()));
                }
                sent = tx.send(record) => {
                    if sent.is_err() {
                        // The consumer went away; nobody is left to read.
                        return Ok(Completion::Stopped(StopReason::Cancelled));
                    }
                }
            }
        }

        if continuation.is_empty() {
            return Ok(Completion::Exhausted);
        }
        token = continuation;
    }
}
