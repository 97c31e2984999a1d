use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::{LocatorError, Result};

/// How often the deadline is compared against the clock.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Cancellation and budget shared by one scan.
///
/// Both the outer content iteration and every bounded sub-walk call
/// [`ScanControl::checkpoint`] once per entry.
#[derive(Debug)]
pub struct ScanControl {
    cancel: CancellationToken,
    max_entries: Option<usize>,
    deadline: Option<Instant>,
    visited: AtomicUsize,
}

impl ScanControl {
    pub fn new(cancel: CancellationToken, max_entries: Option<usize>, timeout: Option<Duration>) -> Self {
        Self {
            cancel,
            max_entries,
            deadline: timeout.map(|t| Instant::now() + t),
            visited: AtomicUsize::new(0),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(CancellationToken::new(), None, None)
    }

    pub fn visited(&self) -> usize {
        self.visited.load(Ordering::Relaxed)
    }

    /// Records one visited entry and fails once the scan must stop.
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(LocatorError::Cancelled);
        }

        let visited = self.visited.fetch_add(1, Ordering::Relaxed) + 1;
        if self.max_entries.is_some_and(|max| visited > max) {
            return Err(LocatorError::BudgetExhausted { visited });
        }
        if visited % DEADLINE_CHECK_INTERVAL == 0 || visited == 1 {
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(LocatorError::BudgetExhausted { visited });
            }
        }

        Ok(())
    }
}

impl Default for ScanControl {
    fn default() -> Self {
        Self::unlimited()
    }
}
