//! Exclusivity primitive guarding per-resource checkout.
//!
//! Each pooled resource carries one [`BinarySemaphore`]: whoever holds
//! its permit holds the resource. A plain mutex would not do here: a
//! resource can be released by a different thread than the one that
//! acquired it, and owner-checked locks fault on cross-thread release.
//! The semaphore tracks no owner at all.

use parking_lot::{Condvar, Mutex};

/// A binary semaphore with no owner tracking.
///
/// At most one holder at a time. Any thread may release the permit,
/// which is what allows a resource acquired on one thread to be handed
/// off and released on another.
#[derive(Debug)]
pub(crate) struct BinarySemaphore {
    held: Mutex<bool>,
    freed: Condvar,
}

impl BinarySemaphore {
    pub(crate) fn new() -> Self {
        Self {
            held: Mutex::new(false),
            freed: Condvar::new(),
        }
    }

    /// Take the permit, blocking until the current holder releases it.
    pub(crate) fn acquire(&self) {
        let mut held = self.held.lock();
        while *held {
            self.freed.wait(&mut held);
        }
        *held = true;
    }

    /// Take the permit only if it is free right now.
    pub(crate) fn try_acquire(&self) -> bool {
        let mut held = self.held.lock();
        if *held {
            false
        } else {
            *held = true;
            true
        }
    }

    /// Free the permit and wake one blocked [`acquire`](Self::acquire).
    ///
    /// Returns whether the permit was actually held. Releasing a free
    /// semaphore is a no-op, so callers can tell a real hand-back from a
    /// stray double release.
    pub(crate) fn release(&self) -> bool {
        let mut held = self.held.lock();
        let was_held = *held;
        *held = false;
        drop(held);
        self.freed.notify_one();
        was_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn permit_is_exclusive() {
        let sem = BinarySemaphore::new();

        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());

        assert!(sem.release());
        assert!(sem.try_acquire());
    }

    #[test]
    fn release_reports_whether_permit_was_held() {
        let sem = BinarySemaphore::new();

        assert!(!sem.release());

        sem.acquire();
        assert!(sem.release());
        assert!(!sem.release());
    }

    #[test]
    fn acquire_blocks_until_released() {
        let sem = Arc::new(BinarySemaphore::new());
        sem.acquire();

        let contender = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || {
                let start = Instant::now();
                sem.acquire();
                start.elapsed()
            })
        };

        thread::sleep(Duration::from_millis(200));
        sem.release();

        let waited = contender.join().unwrap();
        assert!(waited >= Duration::from_millis(150));
    }

    #[test]
    fn release_from_another_thread_is_permitted() {
        let sem = Arc::new(BinarySemaphore::new());
        sem.acquire();

        let releaser = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || sem.release())
        };
        assert!(releaser.join().unwrap());

        assert!(sem.try_acquire());
    }
}
