//! Resource pool trait definition.
//!
//! This module defines the contract for a bounded pool of
//! exclusively-usable resources shared among many concurrent callers.
//!
//! # Pool Model
//!
//! A pool holds caller-supplied resources (connections, buffers, workers)
//! and guarantees that a resource handed to one caller is never handed to
//! another until it has been released. The pool's lifecycle gates every
//! operation:
//!
//! - A pool starts *unopened*; `acquire` and `remove` are refused.
//! - `open` makes the pool serve acquisitions.
//! - `close` shuts the pool down gracefully, waiting for every
//!   checked-out resource to come back. `close_now` shuts it down
//!   immediately and abandons whatever is still checked out.
//! - A closed pool is closed for good; it cannot be reopened.
//!
//! Resources are identified by value: callers must supply types with
//! stable, consistent equality and hashing, since `release` and `remove`
//! key their lookups on the resource itself.

use std::time::Duration;

use crate::error::Result;

/// Contract for a bounded pool of exclusively-usable resources.
///
/// Implementations must be safe to share across threads; every method
/// takes `&self` and may be called from any number of callers
/// concurrently. The pool itself runs no background threads; all work
/// happens synchronously on the calling thread, which may suspend while
/// waiting for a resource, for queue space, or for a holder to release.
pub trait ResourcePool<T>: Send + Sync {
    /// Open the pool so that resources can be acquired.
    ///
    /// Exactly one `open` call can succeed over the pool's lifetime: the
    /// transition is atomic, so two racing calls never both return `Ok`.
    ///
    /// # Errors
    ///
    /// * [`PoolError::AlreadyOpen`] if the pool is currently open.
    /// * [`PoolError::Closed`] if the pool has been closed.
    ///
    /// [`PoolError::AlreadyOpen`]: crate::error::PoolError::AlreadyOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn open(&self) -> Result<()>;

    /// Close the pool gracefully.
    ///
    /// New acquisitions are refused immediately, then the call blocks
    /// until every checked-out resource has been released by its holder.
    /// Its latency is therefore bounded below by the longest outstanding
    /// checkout. Waiters still parked in [`acquire`](Self::acquire) are
    /// woken and yield no resource.
    ///
    /// # Errors
    ///
    /// * [`PoolError::NotOpen`] if the pool was never opened.
    /// * [`PoolError::Closed`] if the pool is already closed.
    ///
    /// [`PoolError::NotOpen`]: crate::error::PoolError::NotOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn close(&self) -> Result<()>;

    /// Close the pool immediately.
    ///
    /// Returns promptly regardless of in-flight checkouts: blocked
    /// waiters are woken and yield no resource, and resources still
    /// checked out are abandoned: the pool forgets them without waiting
    /// for their holders to release. A later `release` of an abandoned
    /// resource is silently ignored.
    ///
    /// # Errors
    ///
    /// Same as [`close`](Self::close).
    fn close_now(&self) -> Result<()>;

    /// Whether the pool is currently open.
    fn is_open(&self) -> bool;

    /// Acquire a resource, waiting as long as it takes.
    ///
    /// The caller gains exclusive use of the returned resource until it
    /// passes it back via [`release`](Self::release).
    ///
    /// # Returns
    ///
    /// * `Ok(Some(resource))` on success.
    /// * `Ok(None)` if the pool was shut down while this caller waited.
    ///
    /// # Errors
    ///
    /// * [`PoolError::NotOpen`] / [`PoolError::Closed`] if the pool is
    ///   not open when the call is made.
    ///
    /// [`PoolError::NotOpen`]: crate::error::PoolError::NotOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn acquire(&self) -> Result<Option<T>>;

    /// Acquire a resource, waiting at most `timeout`.
    ///
    /// The deadline covers the whole call: retries after losing a
    /// contested resource to a faster caller consume the remaining
    /// budget rather than restarting it.
    ///
    /// # Returns
    ///
    /// As [`acquire`](Self::acquire): `Ok(None)` means the pool shut
    /// down while this caller waited.
    ///
    /// # Errors
    ///
    /// * [`PoolError::Timeout`] if the budget elapses first.
    /// * [`PoolError::NotOpen`] / [`PoolError::Closed`] if the pool is
    ///   not open when the call is made.
    ///
    /// [`PoolError::Timeout`]: crate::error::PoolError::Timeout
    /// [`PoolError::NotOpen`]: crate::error::PoolError::NotOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn acquire_timeout(&self, timeout: Duration) -> Result<Option<T>>;

    /// Return a previously acquired resource to the pool.
    ///
    /// Never blocks and never fails observably. Releasing a resource the
    /// pool does not know (never added, removed while checked out, or
    /// abandoned by a forced close) is a silent no-op, as is releasing
    /// the same resource twice.
    fn release(&self, resource: T);

    /// Add a resource to the pool.
    ///
    /// Idempotent: if an equal resource is already known to the pool
    /// (idle or checked out), returns `false` without modification.
    /// Blocks while the pool is at capacity. Adding is permitted before
    /// the pool is opened, so a pool can be populated up front.
    ///
    /// # Returns
    ///
    /// `true` if the resource was newly added, `false` for a duplicate.
    fn add(&self, resource: T) -> bool;

    /// Remove a resource from the pool, waiting for its current holder.
    ///
    /// If the resource is checked out, blocks until the holder releases
    /// it; the resource is then withdrawn before any other caller can
    /// acquire it.
    ///
    /// # Returns
    ///
    /// `true` if the resource was known and is now removed, `false` if
    /// the pool does not know it.
    ///
    /// # Errors
    ///
    /// * [`PoolError::NotOpen`] / [`PoolError::Closed`] if the pool is
    ///   not open.
    ///
    /// [`PoolError::NotOpen`]: crate::error::PoolError::NotOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn remove(&self, resource: &T) -> Result<bool>;

    /// Remove a resource only if it is currently idle.
    ///
    /// Never waits: succeeds only when the resource is sitting in the
    /// pool unacquired. A checked-out or unknown resource is left
    /// untouched.
    ///
    /// # Returns
    ///
    /// `true` if the resource was idle and is now removed, otherwise
    /// `false` with no side effect.
    ///
    /// # Errors
    ///
    /// * [`PoolError::NotOpen`] / [`PoolError::Closed`] if the pool is
    ///   not open.
    ///
    /// [`PoolError::NotOpen`]: crate::error::PoolError::NotOpen
    /// [`PoolError::Closed`]: crate::error::PoolError::Closed
    fn remove_now(&self, resource: &T) -> Result<bool>;
}
