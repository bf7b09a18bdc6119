//! Sequential strategy: one unbounded fetch, then an in-process scan.
//!
//! The whole record list is materialized at once. In exchange the output
//! keeps first-seen order, so it is deterministic for a deterministic source.

use tracing::debug;

use crate::core::{Collection, ContinuationToken, OrderedItemSet, Record, Scope};
use crate::source::{FetchError, RecordSource};

/// Fetches every record in a single page under the scope's deadline.
///
/// Any fetch failure, including the deadline passing or the scope being
/// cancelled, is returned as an error with no partial result.
pub async fn collect<S>(source: &S, scope: &Scope) -> Result<Collection, FetchError>
where
    S: RecordSource + ?Sized,
{
    let page = scope
        .run(source.fetch(scope, None, &ContinuationToken::start()))
        .await??;

    debug!(records = page.records.len(), "scanning records");
    Ok(Collection::complete(scan(&page.records)))
}

/// Distinct non-empty items in first-seen order.
pub fn scan(records: &[Record]) -> Vec<String> {
    let mut set = OrderedItemSet::new();
    for record in records {
        for item in record.non_empty_items() {
            set.insert(item);
        }
    }
    set.into_items()
}
