use std::num::NonZeroUsize;

use async_trait::async_trait;

use super::{FetchError, RecordSource};
use crate::core::{ContinuationToken, Record, RecordPage, Scope};

/// Pages over records that are already in memory.
///
/// The continuation token is the decimal offset of the next record.
#[derive(Debug, Clone, Default)]
pub struct PagedRecords {
    records: Vec<Record>,
}

impl PagedRecords {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn page(
        &self,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError> {
        let offset = parse_offset(continuation, self.records.len())?;
        let end = match page_size {
            Some(size) => offset.saturating_add(size.get()).min(self.records.len()),
            None => self.records.len(),
        };

        let continuation = if end >= self.records.len() {
            ContinuationToken::start()
        } else {
            ContinuationToken::from(end.to_string())
        };

        Ok(RecordPage {
            records: self.records[offset..end].to_vec(),
            continuation,
        })
    }
}

fn parse_offset(token: &ContinuationToken, len: usize) -> Result<usize, FetchError> {
    if token.is_empty() {
        return Ok(0);
    }
    match token.as_str().parse::<usize>() {
        // An offset at or past the end would mean a token we never handed out.
        Ok(offset) if offset > 0 && offset < len => Ok(offset),
        _ => Err(FetchError::InvalidToken(token.to_string())),
    }
}

#[async_trait]
impl RecordSource for PagedRecords {
    async fn fetch(
        &self,
        _scope: &Scope,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError> {
        self.page(page_size, continuation)
    }
}
