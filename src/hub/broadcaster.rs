//! Broadcast hub implementation
//!
//! The central registry mapping connection handles to subscriber info, with
//! the fan-out algorithm and the removal-notification plumbing built on top
//! of it.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use crate::sink::EventSink;

use super::failure::is_benign_disconnect;
use super::listener::{ListenerSet, RemovalListener};

/// Registry and fan-out engine for server-push subscribers
///
/// Maps each connection handle to caller-supplied info and delivers events
/// to all of them, or to the subset whose info matches a predicate. Handles
/// found dead during a broadcast are pruned, and every removal is reported
/// to the registered [`RemovalListener`]s exactly once.
///
/// Cloning is cheap; clones share one registry. Broadcast operations never
/// wait for network I/O: send outcomes are observed on spawned tasks, so
/// `send`/`send_if` must run inside a tokio runtime.
pub struct Broadcaster<S: EventSink, I> {
    inner: Arc<Inner<S, I>>,
}

struct Inner<S: EventSink, I> {
    sinks: DashMap<S, I>,
    listeners: ListenerSet<S, I>,
}

impl<S: EventSink, I> Clone for Broadcaster<S, I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, I> Broadcaster<S, I>
where
    S: EventSink + Clone + Eq + Hash,
    I: Clone + Send + Sync + 'static,
{
    /// Create an empty hub
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                sinks: DashMap::new(),
                listeners: ListenerSet::new(),
            }),
        }
    }

    /// Register a removal listener; insertion order is notification order
    pub fn add_listener(&self, listener: Arc<dyn RemovalListener<S, I>>) {
        self.inner.listeners.add(listener);
    }

    /// Deregister a listener previously passed to [`Self::add_listener`]
    ///
    /// Identity is the `Arc` allocation, not listener contents.
    pub fn remove_listener(&self, listener: &Arc<dyn RemovalListener<S, I>>) {
        self.inner.listeners.remove(listener);
    }

    /// Register `sink` with its info
    ///
    /// Returns the info it replaced if the sink was already registered.
    pub fn add(&self, sink: S, info: I) -> Option<I> {
        self.inner.sinks.insert(sink, info)
    }

    /// Drop the mapping for `sink` without closing it or notifying listeners
    ///
    /// Removing an unregistered sink is a no-op returning `None`.
    pub fn remove(&self, sink: &S) -> Option<I> {
        self.inner.sinks.remove(sink).map(|(_, info)| info)
    }

    /// Info registered for `sink`, if any
    pub fn get_info(&self, sink: &S) -> Option<I> {
        self.inner.sinks.get(sink).map(|entry| entry.value().clone())
    }

    /// Lazily yield the info of every registered subscriber matching
    /// `predicate`
    ///
    /// The sequence is weakly consistent: mutations concurrent with the
    /// iteration may or may not be observed. The iterator holds shard read
    /// guards while alive, so drop it before mutating the registry from the
    /// same thread.
    pub fn infos_if<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = I> + 'a
    where
        P: Fn(&I) -> bool + 'a,
    {
        self.inner
            .sinks
            .iter()
            .filter(move |entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    /// Number of registered subscribers
    pub fn len(&self) -> usize {
        self.inner.sinks.len()
    }

    /// Whether no subscribers are registered
    pub fn is_empty(&self) -> bool {
        self.inner.sinks.is_empty()
    }

    /// Broadcast `event` to every registered, open subscriber
    pub fn send(&self, event: S::Event) {
        self.send_if(event, |_| true);
    }

    /// Broadcast `event` to every open subscriber whose info satisfies
    /// `predicate`
    ///
    /// One traversal of the registry. A sink that already reports closed is
    /// removed and listeners are notified, without a send attempt. Sends
    /// are issued without waiting for delivery; a failed delivery closes
    /// the sink, removes it and notifies listeners from the completion
    /// task. Failures local to one subscriber never abort the broadcast to
    /// the rest.
    pub fn send_if<P>(&self, event: S::Event, predicate: P)
    where
        P: Fn(&I) -> bool,
    {
        tracing::trace!(sinks = self.inner.sinks.len(), "broadcasting event");

        for (sink, info) in self.inner.snapshot() {
            // Entries removed since the snapshot must not be sent to.
            if !self.inner.sinks.contains_key(&sink) {
                continue;
            }

            if sink.is_closed() {
                // Peer already gone; prune instead of sending.
                self.inner.remove_and_notify(&sink);
                continue;
            }

            if !predicate(&info) {
                continue;
            }

            let outcome = sink.send(event.clone());
            let inner = Arc::clone(&self.inner);

            tokio::spawn(async move {
                if let Err(err) = outcome.await {
                    inner.close_sink(&sink);
                    inner.remove_and_notify(&sink);

                    if is_benign_disconnect(&err) {
                        tracing::debug!(error = %err, "subscriber disconnected during send");
                    } else {
                        tracing::warn!(error = %err, "event delivery failed");
                    }
                }
            });
        }
    }

    /// Close and remove every subscriber whose info satisfies `predicate`,
    /// notifying listeners, without sending anything
    ///
    /// Non-matching subscribers are left untouched.
    pub fn close_and_remove_if<P>(&self, predicate: P)
    where
        P: Fn(&I) -> bool,
    {
        for (sink, info) in self.inner.snapshot() {
            if !self.inner.sinks.contains_key(&sink) {
                continue;
            }

            if predicate(&info) {
                self.inner.close_sink(&sink);
                self.inner.remove_and_notify(&sink);
            }
        }
    }

    /// Tear the hub down: close every remaining subscriber and notify
    /// listeners for each, leaving the registry empty
    ///
    /// Terminal operation. Registrations racing with teardown may or may
    /// not be swept; the registry stays consistent either way, and calls
    /// after teardown see an empty hub.
    pub fn close(&self) {
        for (sink, _) in self.inner.snapshot() {
            self.inner.close_sink(&sink);
            self.inner.remove_and_notify(&sink);
        }
    }
}

impl<S, I> Default for Broadcaster<S, I>
where
    S: EventSink + Clone + Eq + Hash,
    I: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I> Inner<S, I>
where
    S: EventSink + Clone + Eq + Hash,
    I: Clone + Send + Sync + 'static,
{
    /// Clone out the current entries.
    ///
    /// DashMap iteration holds shard guards, and removing a key while
    /// iterating its shard deadlocks, so traversals work on a snapshot and
    /// re-check membership as they go.
    fn snapshot(&self) -> Vec<(S, I)> {
        self.sinks
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Single removal path: every way a subscriber can die funnels through
    /// here, and the atomic `remove` decides the winner under races, so
    /// listeners see exactly one notification per removal.
    fn remove_and_notify(&self, sink: &S) {
        if let Some((sink, info)) = self.sinks.remove(sink) {
            self.listeners.notify_removed(&sink, &info);
        }
    }

    fn close_sink(&self, sink: &S) {
        if let Err(err) = sink.close() {
            tracing::debug!(error = %err, "closing subscriber sink failed");
        }
    }
}
