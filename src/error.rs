//! Sink error types
//!
//! Failures a connection handle can report from `send` or `close`.

use std::io;

/// Error type for sink operations
#[derive(Debug)]
pub enum SinkError {
    /// I/O failure on the underlying connection
    Io(io::Error),
    /// The sink was already closed when the operation ran
    Closed,
    /// The request/response exchange backing the sink already completed
    ResponseCompleted,
    /// Any other transport failure
    Transport(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "I/O failure: {}", err),
            SinkError::Closed => write!(f, "Sink is already closed"),
            SinkError::ResponseCompleted => {
                write!(f, "Response cycle backing the sink already completed")
            }
            SinkError::Transport(msg) => write!(f, "Transport failure: {}", msg),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        SinkError::Io(err)
    }
}
