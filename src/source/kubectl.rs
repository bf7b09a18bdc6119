//! Lists pods from a live cluster.
//!
//! Authentication and transport are delegated to `kubectl`: every fetch runs
//! `kubectl get --raw` against the pods endpoint with `limit` and `continue`
//! query parameters, so pagination is the API server's own.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{FetchError, PodList, RecordSource};
use crate::core::{ContinuationToken, RecordPage, Scope};

const DEFAULT_PROGRAM: &str = "kubectl";

#[derive(Debug, Clone)]
pub struct KubectlSource {
    program: PathBuf,
    kubeconfig: Option<PathBuf>,
    namespace: Option<String>,
}

impl KubectlSource {
    pub fn new(kubeconfig: Option<PathBuf>) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            kubeconfig,
            namespace: None,
        }
    }

    /// Use another `kubectl` binary.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Restrict listing to one namespace (default: all namespaces).
    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty());
        self
    }

    fn request_path(
        &self,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> String {
        let mut path = match &self.namespace {
            Some(ns) => format!("/api/v1/namespaces/{}/pods", encode_query_value(ns)),
            None => "/api/v1/pods".to_string(),
        };

        let mut params = Vec::new();
        if let Some(size) = page_size {
            params.push(format!("limit={}", size));
        }
        if !continuation.is_empty() {
            params.push(format!(
                "continue={}",
                encode_query_value(continuation.as_str())
            ));
        }
        if !params.is_empty() {
            path.push('?');
            path.push_str(&params.join("&"));
        }
        path
    }

    fn command(&self, request_path: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(kubeconfig) = &self.kubeconfig {
            cmd.arg("--kubeconfig").arg(kubeconfig);
        }
        cmd.args(["get", "--raw", request_path])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl RecordSource for KubectlSource {
    async fn fetch(
        &self,
        scope: &Scope,
        page_size: Option<NonZeroUsize>,
        continuation: &ContinuationToken,
    ) -> Result<RecordPage, FetchError> {
        let request_path = self.request_path(page_size, continuation);
        debug!(program = %self.program.display(), path = %request_path, "listing pods");

        let output = scope
            .run(self.command(&request_path).output())
            .await?
            .map_err(|err| {
                FetchError::Transport(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(FetchError::Status {
                command: self.program.display().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let list: PodList = serde_json::from_slice(&output.stdout)?;
        let page = list.into_page();
        debug!(
            records = page.records.len(),
            last = page.is_last(),
            "received pod page"
        );
        Ok(page)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
