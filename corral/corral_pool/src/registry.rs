//! Registry mapping each known resource to its exclusivity semaphore.
//!
//! The registry is the source of truth for "does the pool know this
//! resource": an entry exists exactly while the resource has been added
//! and not yet removed, whether it is idle in the queue or checked out.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::sync::BinarySemaphore;

/// Concurrent map from resource value to its exclusivity semaphore.
pub(crate) struct LockRegistry<T> {
    locks: DashMap<T, Arc<BinarySemaphore>>,
}

impl<T: Eq + Hash> LockRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Register a fresh semaphore for `resource` unless already known.
    ///
    /// The check-and-insert is atomic, so two racing registrations of
    /// equal resources cannot both succeed. Returns the new semaphore,
    /// or `None` when the resource was already registered.
    pub(crate) fn register(&self, resource: T) -> Option<Arc<BinarySemaphore>> {
        match self.locks.entry(resource) {
            Entry::Occupied(_) => None,
            Entry::Vacant(vacant) => {
                let lock = Arc::new(BinarySemaphore::new());
                vacant.insert(Arc::clone(&lock));
                Some(lock)
            }
        }
    }

    /// Look up the semaphore for `resource`, if it is known.
    pub(crate) fn lookup(&self, resource: &T) -> Option<Arc<BinarySemaphore>> {
        self.locks.get(resource).map(|entry| Arc::clone(entry.value()))
    }

    /// Forget `resource`. Returns whether it was known.
    pub(crate) fn deregister(&self, resource: &T) -> bool {
        self.locks.remove(resource).is_some()
    }

    /// Clone out every registered semaphore.
    ///
    /// Callers iterate the snapshot instead of the live map so they can
    /// block on the semaphores without holding map shards.
    pub(crate) fn snapshot(&self) -> Vec<Arc<BinarySemaphore>> {
        self.locks
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of registered resources.
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }

    /// Drop every entry.
    pub(crate) fn clear(&self) {
        self.locks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_first_writer_wins() {
        let registry = LockRegistry::new();

        assert!(registry.register("a").is_some());
        assert!(registry.register("a").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_returns_the_registered_semaphore() {
        let registry = LockRegistry::new();
        let lock = registry.register("a").unwrap();

        let found = registry.lookup(&"a").unwrap();
        assert!(Arc::ptr_eq(&lock, &found));
        assert!(registry.lookup(&"b").is_none());
    }

    #[test]
    fn deregister_forgets_the_resource() {
        let registry = LockRegistry::new();
        registry.register("a");

        assert!(registry.deregister(&"a"));
        assert!(!registry.deregister(&"a"));
        assert!(registry.lookup(&"a").is_none());
    }

    #[test]
    fn snapshot_and_clear() {
        let registry = LockRegistry::new();
        registry.register("a");
        registry.register("b");

        assert_eq!(registry.snapshot().len(), 2);
        registry.clear();
        assert_eq!(registry.len(), 0);
        assert!(registry.snapshot().is_empty());
    }
}
