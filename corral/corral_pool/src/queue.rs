//! Bounded blocking FIFO queue of slots.
//!
//! The queue is the pool's sole suspension point: acquirers park here
//! waiting for a slot, and `add` parks here waiting for space. It is a
//! multiset, not a channel: removal by resource equality from the
//! middle of the queue is part of the contract, which is what the
//! removal operations rely on.

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use crate::slot::Slot;

/// Bounded FIFO of [`Slot`]s with blocking and deadline-bounded takes.
pub(crate) struct SlotQueue<T> {
    slots: Mutex<VecDeque<Slot<T>>>,
    capacity: usize,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T: PartialEq> SlotQueue<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Dequeue the oldest slot, blocking until one exists.
    pub(crate) fn take(&self) -> Slot<T> {
        let mut slots = self.slots.lock();
        loop {
            if let Some(slot) = slots.pop_front() {
                drop(slots);
                self.not_full.notify_one();
                return slot;
            }
            self.not_empty.wait(&mut slots);
        }
    }

    /// Dequeue the oldest slot, waiting at most until `deadline`.
    ///
    /// Returns `None` when the deadline passes with the queue still
    /// empty.
    pub(crate) fn poll_until(&self, deadline: Instant) -> Option<Slot<T>> {
        let mut slots = self.slots.lock();
        loop {
            if let Some(slot) = slots.pop_front() {
                drop(slots);
                self.not_full.notify_one();
                return Some(slot);
            }
            if self.not_empty.wait_until(&mut slots, deadline).timed_out() {
                // One last look: a slot may have landed as the wait expired.
                let last = slots.pop_front();
                if last.is_some() {
                    drop(slots);
                    self.not_full.notify_one();
                }
                return last;
            }
        }
    }

    /// Enqueue a slot, blocking while the queue is full.
    pub(crate) fn put(&self, slot: Slot<T>) {
        let mut slots = self.slots.lock();
        while slots.len() >= self.capacity {
            self.not_full.wait(&mut slots);
        }
        slots.push_back(slot);
        drop(slots);
        self.not_empty.notify_one();
    }

    /// Enqueue a slot without blocking.
    ///
    /// Returns `false` if the queue is full.
    pub(crate) fn offer(&self, slot: Slot<T>) -> bool {
        let mut slots = self.slots.lock();
        if slots.len() >= self.capacity {
            return false;
        }
        slots.push_back(slot);
        drop(slots);
        self.not_empty.notify_one();
        true
    }

    /// Remove the first slot wrapping a resource equal to `resource`.
    ///
    /// Returns whether a slot was removed.
    pub(crate) fn remove(&self, resource: &T) -> bool {
        let mut slots = self.slots.lock();
        if let Some(position) = slots.iter().position(|slot| slot.matches(resource)) {
            let _ = slots.remove(position);
            drop(slots);
            self.not_full.notify_one();
            true
        } else {
            false
        }
    }

    /// Drop every resource slot, keeping shutdown markers.
    ///
    /// Waiters parked on the queue still need the markers to wake, so a
    /// purge must not sweep those away. Returns how many resource slots
    /// were dropped.
    pub(crate) fn purge_resources(&self) -> usize {
        let mut slots = self.slots.lock();
        let before = slots.len();
        slots.retain(|slot| slot.is_shutdown());
        let purged = before - slots.len();
        drop(slots);
        if purged > 0 {
            self.not_full.notify_all();
        }
        purged
    }

    /// Number of resource slots currently queued (markers excluded).
    pub(crate) fn resource_len(&self) -> usize {
        self.slots
            .lock()
            .iter()
            .filter(|slot| !slot.is_shutdown())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::BinarySemaphore;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn resource_slot(value: u32) -> Slot<u32> {
        Slot::Resource {
            resource: value,
            lock: Arc::new(BinarySemaphore::new()),
        }
    }

    fn value_of(slot: Slot<u32>) -> u32 {
        match slot {
            Slot::Resource { resource, .. } => resource,
            Slot::Shutdown => panic!("expected a resource slot"),
        }
    }

    #[test]
    fn take_is_fifo() {
        let queue = SlotQueue::new(4);
        queue.put(resource_slot(1));
        queue.put(resource_slot(2));
        queue.put(resource_slot(3));

        assert_eq!(value_of(queue.take()), 1);
        assert_eq!(value_of(queue.take()), 2);
        assert_eq!(value_of(queue.take()), 3);
    }

    #[test]
    fn poll_times_out_on_empty_queue() {
        let queue: SlotQueue<u32> = SlotQueue::new(4);
        let deadline = Instant::now() + Duration::from_millis(50);

        assert!(queue.poll_until(deadline).is_none());
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn poll_returns_slot_offered_while_waiting() {
        let queue = Arc::new(SlotQueue::new(4));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                queue.offer(resource_slot(7));
            })
        };

        let deadline = Instant::now() + Duration::from_secs(2);
        let slot = queue.poll_until(deadline).expect("slot before deadline");
        assert_eq!(value_of(slot), 7);
        producer.join().unwrap();
    }

    #[test]
    fn put_blocks_while_full() {
        let queue = Arc::new(SlotQueue::new(1));
        queue.put(resource_slot(1));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let start = std::time::Instant::now();
                queue.put(resource_slot(2));
                start.elapsed()
            })
        };

        thread::sleep(Duration::from_millis(200));
        assert_eq!(value_of(queue.take()), 1);

        let waited = producer.join().unwrap();
        assert!(waited >= Duration::from_millis(150));
        assert_eq!(value_of(queue.take()), 2);
    }

    #[test]
    fn offer_refuses_when_full() {
        let queue = SlotQueue::new(1);
        assert!(queue.offer(resource_slot(1)));
        assert!(!queue.offer(resource_slot(2)));
    }

    #[test]
    fn remove_matches_by_resource_equality() {
        let queue = SlotQueue::new(4);
        queue.put(resource_slot(1));
        queue.put(resource_slot(2));

        assert!(queue.remove(&2));
        assert!(!queue.remove(&2));
        assert_eq!(queue.resource_len(), 1);
        assert_eq!(value_of(queue.take()), 1);
    }

    #[test]
    fn purge_drops_resources_but_keeps_markers() {
        let queue = SlotQueue::new(4);
        queue.put(resource_slot(1));
        queue.put(Slot::Shutdown);
        queue.put(resource_slot(2));

        assert_eq!(queue.purge_resources(), 2);
        assert_eq!(queue.resource_len(), 0);
        assert!(queue.take().is_shutdown());
    }
}
