//! Deadline-bound cancellable scope threaded through fetch, publish and drain.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// Default time budget for one enumeration.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a scope ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::Cancelled => write!(f, "cancelled"),
            Interrupt::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

/// A deadline plus a cancellation flag.
///
/// Cloning a scope is cheap; all clones observe the same cancellation.
/// The flag is level-triggered: once cancelled, every later check and every
/// later `done().await` observes it immediately.
#[derive(Debug, Clone)]
pub struct Scope {
    deadline: Option<Instant>,
    cancelled: Arc<watch::Sender<bool>>,
}

/// Cancels the scope it was taken from, from any task.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }
}

impl Scope {
    /// A scope that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant has no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::unbounded(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::new(watch::Sender::new(false)),
        }
    }

    /// A scope with no deadline; it ends only when cancelled.
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            cancelled: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancelled: self.cancelled.clone(),
        }
    }

    /// How the scope has ended, or `None` while it is still live.
    ///
    /// Cancellation wins over an expired deadline.
    pub fn interrupt(&self) -> Option<Interrupt> {
        if *self.cancelled.borrow() {
            return Some(Interrupt::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interrupt::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.interrupt().is_some()
    }

    /// Resolves once the scope is cancelled or its deadline passes.
    pub async fn done(&self) -> Interrupt {
        let mut cancelled = self.cancelled.subscribe();
        let deadline = self.deadline;

        tokio::select! {
            biased;
            _ = cancelled.wait_for(|flag| *flag) => Interrupt::Cancelled,
            _ = async move {
                match deadline {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            } => Interrupt::DeadlineExceeded,
        }
    }

    /// Runs `future` unless the scope ends first.
    ///
    /// An already-ended scope never polls the future.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Interrupt> {
        if let Some(reason) = self.interrupt() {
            return Err(reason);
        }

        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            output = future => Ok(output),
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}
