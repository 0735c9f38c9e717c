//! Pool lifecycle state machine.
//!
//! `Unopened → Open → Closed`, with `Closed` terminal: a closed pool
//! cannot be reopened. Transitions are single compare-and-swap
//! operations, so two racing `open` calls never both succeed and an
//! `open` cannot interleave with a `close`.

use std::sync::atomic::{AtomicU8, Ordering};

use corral_core::{PoolError, Result};

const UNOPENED: u8 = 0;
const OPEN: u8 = 1;
const CLOSED: u8 = 2;

/// Atomic three-state lifecycle flag.
///
/// The state also selects the error reported for refused operations:
/// `NotOpen` while the pool has never been opened, `Closed` forever
/// after.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: AtomicU8,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(UNOPENED),
        }
    }

    /// Transition `Unopened → Open`.
    pub(crate) fn open(&self) -> Result<()> {
        match self
            .state
            .compare_exchange(UNOPENED, OPEN, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(()),
            Err(OPEN) => Err(PoolError::AlreadyOpen),
            Err(_) => Err(PoolError::Closed),
        }
    }

    /// Transition `Open → Closed`.
    pub(crate) fn close(&self) -> Result<()> {
        match self
            .state
            .compare_exchange(OPEN, CLOSED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(()),
            Err(UNOPENED) => Err(PoolError::NotOpen),
            Err(_) => Err(PoolError::Closed),
        }
    }

    /// Whether the pool is currently open.
    pub(crate) fn is_open(&self) -> bool {
        self.state.load(Ordering::Acquire) == OPEN
    }

    /// Fail unless the pool is currently open.
    pub(crate) fn ensure_open(&self) -> Result<()> {
        match self.state.load(Ordering::Acquire) {
            OPEN => Ok(()),
            UNOPENED => Err(PoolError::NotOpen),
            _ => Err(PoolError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_unopened_open_closed() {
        let lifecycle = Lifecycle::new();
        assert!(!lifecycle.is_open());
        assert!(matches!(lifecycle.ensure_open(), Err(PoolError::NotOpen)));

        lifecycle.open().unwrap();
        assert!(lifecycle.is_open());
        assert!(lifecycle.ensure_open().is_ok());

        lifecycle.close().unwrap();
        assert!(!lifecycle.is_open());
        assert!(matches!(lifecycle.ensure_open(), Err(PoolError::Closed)));
    }

    #[test]
    fn open_twice_fails() {
        let lifecycle = Lifecycle::new();
        lifecycle.open().unwrap();
        assert!(matches!(lifecycle.open(), Err(PoolError::AlreadyOpen)));
    }

    #[test]
    fn close_before_open_fails() {
        let lifecycle = Lifecycle::new();
        assert!(matches!(lifecycle.close(), Err(PoolError::NotOpen)));
    }

    #[test]
    fn closed_is_terminal() {
        let lifecycle = Lifecycle::new();
        lifecycle.open().unwrap();
        lifecycle.close().unwrap();

        assert!(matches!(lifecycle.close(), Err(PoolError::Closed)));
        assert!(matches!(lifecycle.open(), Err(PoolError::Closed)));
    }
}
