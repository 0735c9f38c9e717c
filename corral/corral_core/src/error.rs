//! Error types for the Corral resource pool.
//!
//! This module defines the single error taxonomy shared by every pool
//! implementation. All failures are immediate, synchronous, and local:
//! the pool performs no internal retries, and the caller decides whether
//! an operation such as `acquire` is worth attempting again.
//!
//! `release` is deliberately absent from this taxonomy: releasing an
//! unknown or stale resource is a silent no-op by design.

use std::time::Duration;

use thiserror::Error;

/// Root error type for pool operations.
#[derive(Debug, Error)]
pub enum PoolError {
    /// `open` was called on a pool that is already open
    #[error("pool is already open")]
    AlreadyOpen,

    /// The operation requires an open pool, but the pool was never opened
    #[error("pool is not open")]
    NotOpen,

    /// The operation requires an open pool, but the pool has been closed.
    ///
    /// Closing is terminal: a closed pool cannot be reopened, so this
    /// error is permanent once observed.
    #[error("pool is closed")]
    Closed,

    /// A bounded wait for a resource exhausted its budget
    #[error("timed out after {0:?} waiting for a resource")]
    Timeout(Duration),
}

/// Convenience alias for results returned by pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
