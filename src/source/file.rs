use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, PagedRecords, PodList, RecordSource};
use crate::core::{ContinuationToken, RecordPage, Scope};

/// Serves a saved `PodList` document (`kubectl get pods -A -o json`).
///
/// The file is read once; fetches page through the loaded records.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    records: PagedRecords,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)
            .map_err(|err| FetchError::Io(format!("{}: {}", path.display(), err)))?;
        let list = PodList::from_json(&content)
            .map_err(|err| FetchError::Decode(format!("{}: {}", path.display(), err)))?;

        let records = PagedRecords::new(list.into_records());
        debug!(path = %path.display(), records = records.len(), "loaded pod list");

        Ok(Self { path, records })
    }

    /// Keep only pods in `namespace`; `None` or empty keeps all.
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        if let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) {
            let records = self
                .records
                .records()
                .iter()
                .filter(|record| record.namespace == namespace)
                .cloned()
                .collect();
            self.records = PagedRecords::new(records);
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fetch(
        &self,
        scope: &Scope,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError> {
        self.records.fetch(scope, page_size, continuation).await
    }
}
