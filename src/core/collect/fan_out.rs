//! Fan-out/fan-in strategy over records that are already in memory.
//!
//! ```text
//!   records ──▶ [input queue] ──▶ worker 0..N ──▶ [item queue, cap 1] ──▶ aggregator ──▶ ItemSet
//!                                      │
//!                                 JoinSet ──▶ barrier task (holds the last sender)
//! ```
//!
//! At most `concurrency` workers run, however many records there are. The
//! barrier waits for every worker and then drops the last item sender, which
//! closes the item queue exactly once. There is no deadline: once started,
//! the pool runs every record to completion.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::core::{Collection, Completion, ItemSet, Record, StopReason};

/// Items buffered between the workers and the aggregator.
pub const ITEM_QUEUE_CAPACITY: usize = 1;

type InputQueue = Arc<Mutex<mpsc::UnboundedReceiver<Record>>>;

#[derive(Debug, Default)]
struct BarrierReport {
    records: usize,
    panicked: usize,
}

/// Collects the distinct items of `records` with a bounded worker pool.
///
/// An empty batch returns immediately without spawning anything.
pub async fn collect(records: Vec<Record>, concurrency: NonZeroUsize) -> Collection {
    if records.is_empty() {
        return Collection::complete(Vec::new());
    }

    let workers = concurrency.get().min(records.len());
    let total = records.len();

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    for record in records {
        // The receiver is alive in this scope, so the send cannot fail.
        let _ = input_tx.send(record);
    }
    drop(input_tx);
    let input: InputQueue = Arc::new(Mutex::new(input_rx));

    let (item_tx, mut item_rx) = mpsc::channel::<String>(ITEM_QUEUE_CAPACITY);
    let mut pool = JoinSet::new();
    for id in 0..workers {
        pool.spawn(work(id, input.clone(), item_tx.clone()));
    }
    debug!(workers, records = total, "fan-out started");

    let barrier = tokio::spawn(async move {
        let mut report = BarrierReport::default();
        while let Some(joined) = pool.join_next().await {
            match joined {
                Ok(handled) => report.records += handled,
                Err(err) => {
                    error!(error = %err, "fan-out worker failed");
                    report.panicked += 1;
                }
            }
        }
        drop(item_tx);
        report
    });

    let mut set = ItemSet::new();
    while let Some(item) = item_rx.recv().await {
        set.insert(item);
    }

    let report = match barrier.await {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "fan-out barrier failed");
            BarrierReport {
                records: 0,
                panicked: workers,
            }
        }
    };
    debug!(
        records = report.records,
        items = set.len(),
        "fan-out drained"
    );

    let completion = if report.panicked > 0 {
        Completion::Stopped(StopReason::WorkerPanicked(report.panicked))
    } else {
        Completion::Exhausted
    };

    Collection {
        items: set.into_items(),
        completion,
    }
}

/// Pulls records until the input queue is empty; returns how many it handled.
async fn work(id: usize, input: InputQueue, items: mpsc::Sender<String>) -> usize {
    let mut handled = 0;
    loop {
        let next = input.lock().await.recv().await;
        let Some(record) = next else {
            break;
        };

        for item in record.items.into_iter().filter(|item| !item.is_empty()) {
            if items.send(item).await.is_err() {
                return handled;
            }
        }
        handled += 1;
    }
    debug!(worker = id, records = handled, "fan-out worker done");
    handled
}
