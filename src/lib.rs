//! Instrumentation for transaction-level simulators: an interrupt transport
//! endpoint and a cache access tracer, plus asynchronix models embedding both.

pub mod config;
pub mod error;
pub mod sim;
pub mod tlm;
pub mod trace;

pub use config::SimConfig;
pub use error::{HandlerError, SinkFailure, TraceError, TransportError};
pub use tlm::{
    Action, ActionCode, InterruptHandler, InterruptLines, InterruptRequest, InterruptResponse,
    InterruptTransportEndpoint, LineId, PortStats, Status, TlmKind,
};
pub use trace::{AccessTracer, TraceEvent, TraceOp, TraceSink, TraceStats, VecSink, WriterSink};
