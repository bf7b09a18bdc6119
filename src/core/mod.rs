//! Core enumeration engine.
//!
//! ## Module Structure
//!
//! - `record`: records, pages and continuation tokens
//! - `scope`: deadline plus cancellation, passed to every blocking step
//! - `collection`: result type and presence sets
//! - `collect`: the sequential, streaming and fan-out strategies
//! - `image`: image reference parsing

pub mod collect;
pub mod collection;
pub mod image;
pub mod record;
pub mod scope;

pub use collect::{Collector, Strategy};
pub use collection::{Collection, Completion, ItemSet, OrderedItemSet, StopReason};
pub use image::{DEFAULT_TAG, ImageRef};
pub use record::{ContinuationToken, Record, RecordPage};
pub use scope::{CancelHandle, DEFAULT_TIMEOUT, Interrupt, Scope};
