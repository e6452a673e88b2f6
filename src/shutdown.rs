//! Process-wide shutdown coordination and per-call cancellation.
//! The ctrlc handler sets a global flag; every `CancelToken` also observes it,
//! so long-running operations can stop at the next filesystem-call boundary.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
//!
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{FileMoverError, Result};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Test/utility-only: clear the shutdown flag.
#[cfg(test)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}

/// Cancellation signal handed to every session and filesystem operation.
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip this token (and every clone of it).
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || is_requested()
    }

    /// Return `Err(Interrupted)` once cancelled; call before each filesystem step.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(FileMoverError::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(token.check().is_ok());
        other.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(FileMoverError::Interrupted)));
    }

    #[test]
    #[serial]
    fn global_shutdown_trips_every_token() {
        reset();
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        request();
        assert!(token.is_cancelled());
        reset();
        assert!(!token.is_cancelled());
    }
}
