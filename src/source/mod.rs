//! Record sources: the "list records, page by page" capability the
//! collectors consume.
//!
//! ## Module Structure
//!
//! - `paged`: in-memory paging over an already-loaded record list
//! - `pod_list`: the Kubernetes `PodList` document and its mapping to records
//! - `file`: serves a saved `PodList` JSON file page by page
//! - `kubectl`: lists pods from a live cluster through `kubectl get --raw`
//!
//! Sources own transport, authentication and the page schema. Collectors
//! never retry a failed fetch; a source that wants retries does them itself.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::{ContinuationToken, Interrupt, RecordPage, Scope};

mod file;
mod kubectl;
mod paged;
mod pod_list;
#[cfg(test)]
pub(crate) mod testing;

pub use file::FileSource;
pub use kubectl::KubectlSource;
pub use paged::PagedRecords;
pub use pod_list::{PodList, PodListMetadata};

/// Errors raised by a record source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{command} exited with {status}: {stderr}")]
    Status {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid continuation token: {0:?}")]
    InvalidToken(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("cancelled")]
    Cancelled,
}

impl FetchError {
    /// True when the fetch was cut short by its scope rather than failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled | FetchError::DeadlineExceeded)
    }
}

impl From<Interrupt> for FetchError {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Cancelled => FetchError::Cancelled,
            Interrupt::DeadlineExceeded => FetchError::DeadlineExceeded,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// A paginated source of records.
///
/// Passing the empty token requests the first page. A returned page with an
/// empty token is the last one. `page_size: None` asks for every remaining
/// record in a single page.
///
/// The scope is handed to the source so it can bound its own I/O; callers do
/// not abort a fetch that is already in flight.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(
        &self,
        scope: &Scope,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError>;
}
