//! Cooperative cancellation for long-running walks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Returned when a query observes its [`CancelToken`] mid-flight.
///
/// An interrupted walk yields nothing; partial results from it are
/// meaningless and are never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("query interrupted")]
pub struct Interrupted;

/// A shared flag a caller flips to abort in-flight traversals.
///
/// Clones share the flag. Traversals check it between rounds, so
/// cancellation takes effect at the next round boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation. There is no way to un-cancel.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
