//! Outbound push event payload
//!
//! The hub is generic over the event type it broadcasts; `PushEvent` is the
//! common payload shape: an optional event name, an optional id for
//! client-side resume, and the data body. How the event is put on the wire
//! is the transport layer's business.
//!
//! Cloning is cheap because the body is reference-counted `Bytes`: a
//! broadcast to N subscribers shares one allocation.

use bytes::Bytes;

/// An event to push to subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushEvent {
    /// Event name/type, if any
    pub name: Option<String>,
    /// Event id, if any
    pub id: Option<String>,
    /// Payload body (zero-copy via reference counting)
    pub data: Bytes,
}

impl PushEvent {
    /// Create an unnamed event carrying `data`
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            name: None,
            id: None,
            data: data.into(),
        }
    }

    /// Create a named event carrying `data`
    pub fn named(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: Some(name.into()),
            id: None,
            data: data.into(),
        }
    }

    /// Attach an event id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
