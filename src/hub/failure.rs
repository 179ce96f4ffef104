//! Send-failure classification
//!
//! Decides which send failures are worth a warning. Peers of long-lived
//! push connections go away all the time, so the expected disconnect shapes
//! are kept out of the warning log; cleanup runs the same either way.

use std::io;

use crate::error::SinkError;

/// True when `err` signals an expected "peer went away" condition.
///
/// The set of shapes is heuristic and transport-specific; revisit it when
/// pointing the hub at a different transport.
pub(crate) fn is_benign_disconnect(err: &SinkError) -> bool {
    match err {
        SinkError::Closed | SinkError::ResponseCompleted => true,
        SinkError::Io(err) => matches!(
            err.kind(),
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::UnexpectedEof
        ),
        SinkError::Transport(_) => false,
    }
}
