//! Bounded, thread-safe resource pool.
//!
//! [`BoundedPool`] hands caller-supplied resources to concurrent
//! callers, one holder per resource at a time. It composes three pieces:
//! a bounded FIFO queue of idle slots (where callers suspend), a
//! registry mapping every known resource to its exclusivity semaphore,
//! and a three-state lifecycle flag. The pool runs no background
//! threads; everything happens on the calling thread.
//!
//! # Acquisition protocol
//!
//! An acquirer dequeues a slot and takes the slot's semaphore without
//! blocking. Losing that take means another caller (or an in-flight
//! removal) owns the slot, so the loser discards it and goes back to the
//! queue. Resources therefore circulate in roughly FIFO order, but two
//! callers racing one slot may be served out of arrival order.
//!
//! # Shutdown
//!
//! Graceful [`close`](corral_core::ResourcePool::close) drains every
//! holder before returning; forced
//! [`close_now`](corral_core::ResourcePool::close_now) returns at once
//! and abandons outstanding checkouts: the pool forgets those resources
//! without reconciling them, and their holders' eventual `release` calls
//! are ignored. Both modes leave shutdown markers in the queue so that
//! every waiter parked in an acquire wakes and yields no resource.

use std::hash::Hash;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use parking_lot::Mutex;

use corral_core::{PoolError, ResourcePool, Result};

use crate::config::PoolConfig;
use crate::lifecycle::Lifecycle;
use crate::queue::SlotQueue;
use crate::registry::LockRegistry;
use crate::slot::Slot;

/// A bounded pool of exclusively-usable resources shared by many threads.
///
/// Resources are identified by value, so `T` must provide stable
/// equality and hashing. The pool clones the value once at `add` time to
/// key its registry; the value itself circulates through the queue and
/// out to callers.
///
/// # Examples
///
/// ```
/// use corral_pool::{BoundedPool, ResourcePool};
///
/// let pool = BoundedPool::new(2);
/// assert!(pool.add("worker-a".to_string()));
/// pool.open()?;
///
/// let held = pool.acquire()?.expect("pool is open");
/// assert_eq!(held, "worker-a");
/// pool.release(held);
///
/// pool.close()?;
/// # Ok::<(), corral_pool::PoolError>(())
/// ```
pub struct BoundedPool<T> {
    /// Idle slots, FIFO; the only place callers suspend.
    queue: SlotQueue<T>,
    /// Exclusivity semaphore for every known resource.
    registry: LockRegistry<T>,
    /// `Unopened → Open → Closed`.
    lifecycle: Lifecycle,
    /// Serializes structural operations (`add`, `remove`, graceful
    /// `close`) so a removal can never interleave with an add of the
    /// same resource. Forced close stays outside so it can never be
    /// held up by a stuck structural call.
    admin: Mutex<()>,
    config: PoolConfig,
}

impl<T> BoundedPool<T>
where
    T: Clone + Eq + Hash + Send + Sync,
{
    /// Create a pool holding at most `capacity` resources.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(PoolConfig::with_capacity(capacity))
    }

    /// Create a pool from a full configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configured capacity is zero.
    pub fn with_config(config: PoolConfig) -> Self {
        assert!(config.capacity > 0, "pool capacity must be nonzero");
        Self {
            queue: SlotQueue::new(config.capacity),
            registry: LockRegistry::new(),
            lifecycle: Lifecycle::new(),
            admin: Mutex::new(()),
            config,
        }
    }

    /// Capacity the pool was configured with.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of resources known to the pool, idle or checked out.
    pub fn total_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of resources currently idle and available to acquire.
    pub fn available_count(&self) -> usize {
        self.queue.resource_len()
    }

    fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or("unnamed")
    }
}

impl<T> Default for BoundedPool<T>
where
    T: Clone + Eq + Hash + Send + Sync,
{
    fn default() -> Self {
        Self::with_config(PoolConfig::default())
    }
}

impl<T> ResourcePool<T> for BoundedPool<T>
where
    T: Clone + Eq + Hash + Send + Sync,
{
    fn open(&self) -> Result<()> {
        self.lifecycle.open()?;
        debug!(
            "pool '{}' opened (capacity {})",
            self.name(),
            self.config.capacity
        );
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let _admin = self.admin.lock();
        self.lifecycle.close()?;
        debug!(
            "pool '{}' closing, draining {} known resources",
            self.name(),
            self.registry.len()
        );

        // Wait for every checked-out resource to come back: taking a
        // semaphore observes it free (its holder has released), and
        // freeing it again leaves no permit dangling. Holders can still
        // release while this runs because the registry is cleared only
        // after the drain.
        for lock in self.registry.snapshot() {
            lock.acquire();
            lock.release();
        }

        self.registry.clear();
        let purged = self.queue.purge_resources();
        // Wake anything still parked in an acquire. Waiters re-offer the
        // marker before yielding, so one is enough to reach them all.
        self.queue.offer(Slot::Shutdown);

        debug!(
            "pool '{}' closed ({} idle slots dropped)",
            self.name(),
            purged
        );
        Ok(())
    }

    fn close_now(&self) -> Result<()> {
        self.lifecycle.close()?;
        let known = self.registry.len();
        let purged = self.queue.purge_resources();

        // One marker per known resource, and at least one so waiters on
        // an empty pool still wake.
        for _ in 0..known.max(1) {
            if !self.queue.offer(Slot::Shutdown) {
                break;
            }
        }
        self.registry.clear();

        let abandoned = known.saturating_sub(purged);
        if abandoned > 0 {
            warn!(
                "pool '{}' force-closed with {} resources still checked out; their holders are abandoned",
                self.name(),
                abandoned
            );
        } else {
            debug!(
                "pool '{}' force-closed ({} idle slots dropped)",
                self.name(),
                purged
            );
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    fn acquire(&self) -> Result<Option<T>> {
        self.lifecycle.ensure_open()?;
        loop {
            let slot = self.queue.take();
            if !self.lifecycle.is_open() {
                // The pool closed while this caller was parked. Whatever
                // was dequeued is no longer ours to hand out; pass the
                // wake-up on to the next parked waiter.
                self.queue.offer(Slot::Shutdown);
                trace!("pool '{}': acquire woken by shutdown", self.name());
                return Ok(None);
            }
            match slot {
                Slot::Shutdown => {
                    self.queue.offer(Slot::Shutdown);
                    trace!("pool '{}': acquire woken by shutdown", self.name());
                    return Ok(None);
                }
                Slot::Resource { resource, lock } => {
                    if lock.try_acquire() {
                        trace!("pool '{}': resource acquired", self.name());
                        return Ok(Some(resource));
                    }
                    // A faster caller or an in-flight removal owns this
                    // slot's permit; skip it and wait for the next one.
                    trace!("pool '{}': skipped a contested slot", self.name());
                }
            }
        }
    }

    fn acquire_timeout(&self, timeout: Duration) -> Result<Option<T>> {
        self.lifecycle.ensure_open()?;
        // The deadline is computed once: retries after losing a slot
        // race consume the remaining budget instead of restarting it.
        let deadline = Instant::now() + timeout;
        loop {
            let Some(slot) = self.queue.poll_until(deadline) else {
                trace!(
                    "pool '{}': timed acquire gave up after {:?}",
                    self.name(),
                    timeout
                );
                return Err(PoolError::Timeout(timeout));
            };
            if !self.lifecycle.is_open() {
                self.queue.offer(Slot::Shutdown);
                trace!("pool '{}': timed acquire woken by shutdown", self.name());
                return Ok(None);
            }
            match slot {
                Slot::Shutdown => {
                    self.queue.offer(Slot::Shutdown);
                    trace!("pool '{}': timed acquire woken by shutdown", self.name());
                    return Ok(None);
                }
                Slot::Resource { resource, lock } => {
                    if lock.try_acquire() {
                        return Ok(Some(resource));
                    }
                    trace!("pool '{}': skipped a contested slot", self.name());
                }
            }
        }
    }

    fn release(&self, resource: T) {
        // Unknown resources (never added, removed while checked out, or
        // forgotten by a forced close) are ignored, as is releasing an
        // idle resource twice.
        let Some(lock) = self.registry.lookup(&resource) else {
            trace!(
                "pool '{}': release of an unknown resource ignored",
                self.name()
            );
            return;
        };
        if lock.release() {
            if !self.queue.offer(Slot::Resource { resource, lock }) {
                // Capacity is sized to the registry, so a full queue here
                // means a shutdown purge is racing this release; the
                // purge owns the slot either way.
                trace!(
                    "pool '{}': released slot dropped, queue full",
                    self.name()
                );
            }
        } else {
            trace!("pool '{}': double release ignored", self.name());
        }
    }

    fn add(&self, resource: T) -> bool {
        let _admin = self.admin.lock();
        let Some(lock) = self.registry.register(resource.clone()) else {
            trace!("pool '{}': duplicate add ignored", self.name());
            return false;
        };
        // Blocks while the queue is full.
        self.queue.put(Slot::Resource { resource, lock });
        debug!(
            "pool '{}': resource added ({} known)",
            self.name(),
            self.registry.len()
        );
        true
    }

    fn remove(&self, resource: &T) -> Result<bool> {
        let _admin = self.admin.lock();
        self.lifecycle.ensure_open()?;
        let Some(lock) = self.registry.lookup(resource) else {
            return Ok(false);
        };

        // Taking the permit waits out the current holder, and holding it
        // from here on bars any racing acquirer from winning the slot:
        // their non-blocking take fails and they skip it. The permit is
        // never given back; the resource is leaving the pool.
        lock.acquire();
        if !self.queue.remove(resource) {
            // A racing acquirer dequeued the slot and discarded it after
            // losing the permit race; nothing left to pull out.
            trace!(
                "pool '{}': removed resource had already left the queue",
                self.name()
            );
        }
        self.registry.deregister(resource);
        debug!(
            "pool '{}': resource removed ({} known)",
            self.name(),
            self.registry.len()
        );
        Ok(true)
    }

    fn remove_now(&self, resource: &T) -> Result<bool> {
        self.lifecycle.ensure_open()?;
        // Only an idle resource still sitting in the queue can be
        // removed without waiting.
        if !self.queue.remove(resource) {
            return Ok(false);
        }
        self.registry.deregister(resource);
        debug!(
            "pool '{}': idle resource removed ({} known)",
            self.name(),
            self.registry.len()
        );
        Ok(true)
    }
}
