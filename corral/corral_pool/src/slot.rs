//! Queue entries: a resource paired with its lock, or a shutdown marker.

use std::sync::Arc;

use crate::sync::BinarySemaphore;

/// One entry in the pool's queue.
///
/// A `Resource` slot carries an idle resource and the semaphore guarding
/// its exclusive use; the semaphore instance is shared with the lock
/// registry. A `Shutdown` slot carries nothing usable; it exists only
/// to wake a waiter blocked on the queue when the pool is shutting down,
/// and is never registered or handed to a caller as a resource.
#[derive(Debug)]
pub(crate) enum Slot<T> {
    /// An idle resource and its exclusivity semaphore.
    Resource {
        /// The pooled resource value.
        resource: T,
        /// Exclusivity permit, shared with the registry entry.
        lock: Arc<BinarySemaphore>,
    },
    /// Shutdown marker that wakes one blocked waiter.
    Shutdown,
}

impl<T: PartialEq> Slot<T> {
    /// Whether this slot wraps a resource equal to `resource`.
    ///
    /// Slot identity is defined solely by the wrapped value; shutdown
    /// markers match nothing.
    pub(crate) fn matches(&self, resource: &T) -> bool {
        match self {
            Slot::Resource { resource: held, .. } => held == resource,
            Slot::Shutdown => false,
        }
    }
}

impl<T> Slot<T> {
    /// Whether this slot is a shutdown marker.
    pub(crate) fn is_shutdown(&self) -> bool {
        matches!(self, Slot::Shutdown)
    }
}
