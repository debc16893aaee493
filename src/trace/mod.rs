mod event;
mod sink;
mod tracer;

pub use event::{TraceEvent, TraceOp};
pub use sink::{TraceSink, VecSink, WriterSink};
pub use tracer::{AccessTracer, TraceStats};
