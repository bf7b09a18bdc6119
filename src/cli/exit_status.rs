use std::process::ExitCode;

use crate::core::Collection;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed and every pod was enumerated
/// - `Failure` (1): Enumeration stopped early; the printed list is partial
/// - `Error` (2): Command failed (config error, fetch error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and every pod was enumerated.
    Success,
    /// Enumeration stopped early; the printed list is partial.
    Failure,
    /// Command failed (config error, fetch error, etc.).
    Error,
}

impl ExitStatus {
    pub fn from_collection(collection: &Collection) -> Self {
        if collection.is_complete() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
