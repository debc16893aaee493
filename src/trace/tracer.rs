use log::{debug, warn};

use crate::error::TraceError;
use super::event::{TraceEvent, TraceOp};
use super::sink::TraceSink;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceStats {
    pub recorded: u64,
    pub failures: u64,
}

/// Order-preserving log of every access reported by one cache.
///
/// The sink is bound for the tracer's whole lifetime and closed exactly once,
/// either by [`finish`](Self::finish) or on drop.
pub struct AccessTracer<S: TraceSink> {
    sink: S,
    stats: TraceStats,
    closed: bool,
}

impl<S: TraceSink> AccessTracer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            stats: TraceStats::default(),
            closed: false,
        }
    }

    /// Append one event. Sink failures are handed back untouched; there is no
    /// retry.
    pub fn record(&mut self, op: TraceOp, address: u32, length: u32) -> Result<(), TraceError> {
        if length == 0 {
            return Err(TraceError::EmptyAccess { address });
        }
        let event = TraceEvent::new(op, address, length);
        match self.sink.append(&event) {
            Ok(()) => {
                self.stats.recorded += 1;
                Ok(())
            }
            Err(e) => {
                self.stats.failures += 1;
                warn!("could not trace {}: {}", event, e);
                Err(e.into())
            }
        }
    }
    pub fn read(&mut self, address: u32, length: u32) -> Result<(), TraceError> {
        self.record(TraceOp::Read, address, length)
    }
    pub fn write(&mut self, address: u32, length: u32) -> Result<(), TraceError> {
        self.record(TraceOp::Write, address, length)
    }

    pub fn recorded(&self) -> u64 {
        self.stats.recorded
    }
    pub fn failures(&self) -> u64 {
        self.stats.failures
    }
    pub fn stats(&self) -> TraceStats {
        self.stats
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Close the sink now and report what was recorded.
    pub fn finish(mut self) -> TraceStats {
        self.close();
        self.stats
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.sink.close();
            debug!("trace closed after {} events ({} failed)", self.stats.recorded, self.stats.failures);
        }
    }
}

impl<S: TraceSink> Drop for AccessTracer<S> {
    fn drop(&mut self) {
        self.close();
    }
}
