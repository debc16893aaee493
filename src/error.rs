use std::io;

use thiserror::Error;

use crate::tlm::LineId;

/// Failure reported by an [`InterruptHandler`](crate::tlm::InterruptHandler).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("unknown interrupt line {0}")]
    UnknownLine(LineId),

    #[error("operation not permitted on line {line}: {reason}")]
    NotPermitted { line: LineId, reason: &'static str },
}

/// Why a transport call ended with an ERROR response.
///
/// These never leave the endpoint; they are logged and folded into
/// [`Status::Error`](crate::tlm::Status::Error).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request addresses unknown target {0}")]
    UnknownTarget(LineId),

    #[error("malformed request: unsupported action code {0:#04x}")]
    MalformedRequest(u8),

    #[error(transparent)]
    NotPermitted(HandlerError),
}

impl From<HandlerError> for TransportError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::UnknownLine(line) => TransportError::UnknownTarget(line),
            other => TransportError::NotPermitted(other),
        }
    }
}

/// The trace sink could not accept an event.
#[derive(Debug, Error)]
pub enum SinkFailure {
    #[error("trace sink is closed")]
    Closed,

    #[error("trace sink write failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error(transparent)]
    Sink(#[from] SinkFailure),

    #[error("zero-length access at {address:#010x}")]
    EmptyAccess { address: u32 },
}
