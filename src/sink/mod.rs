//! Connection handle abstraction
//!
//! A sink is the outbound half of one subscriber's connection. The hub only
//! ever holds sinks by handle: it never creates or destroys the underlying
//! transport resource, it just sends into it and asks it to close.

pub mod channel;

pub use channel::ChannelSink;

use futures::future::BoxFuture;

use crate::error::SinkError;

/// Outcome of a send started by [`EventSink::send`]
pub type SendFuture = BoxFuture<'static, Result<(), SinkError>>;

/// Outbound channel of one subscriber
///
/// Implementations are expected to be cheap handles (typically a channel
/// sender or an `Arc` around the real connection): the hub clones them into
/// the completion task of every send. The registry keys on `Eq`/`Hash`, so
/// clones of the same handle must compare equal and distinct connections
/// must not.
pub trait EventSink: Send + Sync + 'static {
    /// Payload delivered through this sink
    type Event: Clone + Send + 'static;

    /// Whether the connection is already known to be closed
    fn is_closed(&self) -> bool;

    /// Start sending `event`
    ///
    /// Must not block. Sends against one sink must reach the transport in
    /// call order, so start or enqueue the send before returning; the
    /// returned future only reports the outcome.
    fn send(&self, event: Self::Event) -> SendFuture;

    /// Best-effort close of the connection
    ///
    /// Must be idempotent. Errors are logged by the hub and never
    /// propagated further.
    fn close(&self) -> Result<(), SinkError>;
}
