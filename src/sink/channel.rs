//! Channel-backed connection handle
//!
//! `ChannelSink` bridges the hub to a connection task over a bounded
//! `tokio::sync::mpsc` channel. The transport side owns the receiver and
//! drains it onto the wire; a dropped receiver is how a dead peer shows up
//! here.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::SinkError;

use super::{EventSink, SendFuture};

/// Process-unique ids so clones of the same sink hash alike
static NEXT_SINK_ID: AtomicU64 = AtomicU64::new(1);

/// Connection handle backed by a bounded mpsc channel
///
/// A subscriber whose buffer is full fails the send instead of letting one
/// slow peer stall the broadcast; the hub then drops it like any other
/// failed sink.
///
/// Closing is best-effort: `close` flips a flag that fails further sends,
/// while the channel itself lives until the receiver side drops it.
pub struct ChannelSink<E> {
    id: u64,
    tx: mpsc::Sender<E>,
    closed: Arc<AtomicBool>,
}

impl<E: Clone + Send + 'static> ChannelSink<E> {
    /// Create a sink and the receiver for the connection task
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<E>) {
        let (tx, rx) = mpsc::channel(capacity);
        let sink = Self {
            id: NEXT_SINK_ID.fetch_add(1, Ordering::Relaxed),
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        };
        (sink, rx)
    }

    /// Id of this sink; stable across clones
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<E> Clone for ChannelSink<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<E> PartialEq for ChannelSink<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for ChannelSink<E> {}

impl<E> Hash for ChannelSink<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E> fmt::Debug for ChannelSink<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelSink")
            .field("id", &self.id)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl<E: Clone + Send + 'static> EventSink for ChannelSink<E> {
    type Event = E;

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed) || self.tx.is_closed()
    }

    fn send(&self, event: E) -> SendFuture {
        // Reserve and fill a slot before returning so events enter the
        // channel in call order; the future only reports the outcome.
        let outcome: Result<(), SinkError> = if self.closed.load(Ordering::Relaxed) {
            Err(SinkError::Closed)
        } else {
            match self.tx.clone().try_reserve_owned() {
                Ok(permit) => {
                    permit.send(event);
                    Ok(())
                }
                // The receiver is gone, i.e. the peer left.
                Err(mpsc::error::TrySendError::Closed(_)) => Err(SinkError::Closed),
                Err(mpsc::error::TrySendError::Full(_)) => Err(SinkError::Transport(
                    "subscriber event buffer is full".to_string(),
                )),
            }
        };

        Box::pin(async move { outcome })
    }

    fn close(&self) -> Result<(), SinkError> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}
