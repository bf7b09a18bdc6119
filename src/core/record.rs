//! Records, pages and continuation tokens exchanged with a record source.

use std::fmt;

/// One composite unit fetched from the cluster (a pod).
///
/// Only the item references matter to the collectors; `namespace` and `name`
/// are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub namespace: String,
    pub name: String,
    /// Raw item identifiers in declaration order. May contain empty strings.
    pub items: Vec<String>,
}

impl Record {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            items,
        }
    }

    /// Item identifiers with empty values skipped.
    pub fn non_empty_items(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| !item.is_empty())
    }
}

/// Opaque pagination cursor.
///
/// The empty token requests the first page when passed to a fetch, and marks
/// exhaustion when returned from one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// The token that requests the first page.
    pub fn start() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContinuationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContinuationToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A page of records plus the cursor for the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub continuation: ContinuationToken,
}

impl RecordPage {
    /// True when no further pages exist.
    pub fn is_last(&self) -> bool {
        self.continuation.is_empty()
    }
}
