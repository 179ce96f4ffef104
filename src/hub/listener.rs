//! Removal listeners
//!
//! Observers notified when a subscriber leaves the registry, whatever the
//! cause: a failed send, closed-detection during a broadcast, a bulk close,
//! or teardown.

use std::sync::Arc;

use parking_lot::RwLock;

/// Observer for subscriber removals
///
/// `info` is the value that was associated with the sink at removal time.
/// Notification runs on whichever task discovered the removal; keep
/// implementations quick and non-blocking.
pub trait RemovalListener<S, I>: Send + Sync {
    /// Called once per removed subscriber
    fn sink_removed(&self, sink: &S, info: &I);
}

/// Ordered listener list; insertion order is notification order
///
/// The list is read-mostly. A notification pass works on a snapshot, so
/// listeners can register or deregister concurrently with one.
pub(crate) struct ListenerSet<S, I> {
    entries: RwLock<Vec<Arc<dyn RemovalListener<S, I>>>>,
}

impl<S, I> ListenerSet<S, I> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, listener: Arc<dyn RemovalListener<S, I>>) {
        self.entries.write().push(listener);
    }

    /// Remove by identity; the `Arc` allocation is the identity.
    pub(crate) fn remove(&self, listener: &Arc<dyn RemovalListener<S, I>>) {
        self.entries
            .write()
            .retain(|entry| !Arc::ptr_eq(entry, listener));
    }

    /// Notify every listener registered when the pass begins.
    pub(crate) fn notify_removed(&self, sink: &S, info: &I) {
        let entries = self.entries.read().clone();
        for listener in entries {
            listener.sink_removed(sink, info);
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    struct Tagged {
        tag: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl RemovalListener<u32, String> for Tagged {
        fn sink_removed(&self, _sink: &u32, _info: &String) {
            self.seen.lock().push(self.tag);
        }
    }

    #[test]
    fn test_notifies_in_insertion_order() {
        let set: ListenerSet<u32, String> = ListenerSet::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        set.add(Arc::new(Tagged {
            tag: "first",
            seen: Arc::clone(&seen),
        }));
        set.add(Arc::new(Tagged {
            tag: "second",
            seen: Arc::clone(&seen),
        }));

        set.notify_removed(&7, &"info".to_string());

        assert_eq!(*seen.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_removes_by_identity() {
        let set: ListenerSet<u32, String> = ListenerSet::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first: Arc<dyn RemovalListener<u32, String>> = Arc::new(Tagged {
            tag: "first",
            seen: Arc::clone(&seen),
        });
        let second: Arc<dyn RemovalListener<u32, String>> = Arc::new(Tagged {
            tag: "second",
            seen: Arc::clone(&seen),
        });

        set.add(Arc::clone(&first));
        set.add(Arc::clone(&second));
        set.remove(&first);

        set.notify_removed(&7, &"info".to_string());

        assert_eq!(*seen.lock(), vec!["second"]);
    }
}
