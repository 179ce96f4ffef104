//! Broadcast hub for server-push event channels
//!
//! `sse-hub` keeps a concurrency-safe registry of push subscribers and fans
//! events out to all of them, or to a filtered subset, pruning dead
//! connections as broadcasts find them and reporting every removal to
//! registered listeners.
//!
//! The hub is transport-agnostic: anything implementing [`EventSink`] can
//! be registered, keyed by the handle itself and paired with caller-defined
//! subscriber info used for filtering. [`ChannelSink`] is a ready-made
//! implementation over a bounded `tokio::sync::mpsc` channel for the common
//! case of a connection task draining events onto the wire.
//!
//! # Example
//!
//! ```no_run
//! use sse_hub::{Broadcaster, ChannelSink, PushEvent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let hub: Broadcaster<ChannelSink<PushEvent>, String> = Broadcaster::new();
//!
//!     let (sink, mut rx) = ChannelSink::new(16);
//!     hub.add(sink, "topic:alerts".to_string());
//!
//!     // The transport side owns the receiver and writes to the wire.
//!     tokio::spawn(async move {
//!         while let Some(event) = rx.recv().await {
//!             let _ = event;
//!         }
//!     });
//!
//!     hub.send_if(PushEvent::named("alert", "disk full"), |info| {
//!         info == "topic:alerts"
//!     });
//! }
//! ```
//!
//! Send failures are observed asynchronously and classified: expected
//! peer-went-away shapes are cleaned up quietly, anything else is cleaned
//! up and logged at warning level with the cause attached.

pub mod error;
pub mod event;
pub mod hub;
pub mod sink;

pub use error::SinkError;
pub use event::PushEvent;
pub use hub::{Broadcaster, RemovalListener};
pub use sink::{ChannelSink, EventSink, SendFuture};
