//! Subscriber registry and broadcast fan-out
//!
//! The hub owns the mapping from connection handles to subscriber info and
//! fans events out to all of them, or to the subset matching a predicate.
//! Dead connections are pruned as broadcasts find them, and every removal
//! is reported to registered listeners exactly once, whichever code path
//! discovered it.
//!
//! # Architecture
//!
//! ```text
//!                    Broadcaster<S, I> ──► Arc<Inner>
//!                  ┌─────────────────────────────────┐
//!                  │ sinks: DashMap<S, I>            │
//!                  │ listeners: ListenerSet<S, I>    │
//!                  └────────────────┬────────────────┘
//!                                   │ send_if(event, predicate)
//!             ┌─────────────────────┼─────────────────────┐
//!             ▼                     ▼                     ▼
//!         [sink S1]             [sink S2]             [sink S3]
//!        send(event)       is_closed() == true     predicate false
//!             │             remove + notify             skip
//!             ▼
//!      completion task
//!      on Err: close, remove, notify, classify for logging
//! ```
//!
//! The map is a concurrent hash map, so subscribers connect and disconnect
//! without serializing behind an in-flight broadcast; iteration is weakly
//! consistent by design.

pub mod broadcaster;
pub mod listener;

mod failure;

pub use broadcaster::Broadcaster;
pub use listener::RemovalListener;
