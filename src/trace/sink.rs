use std::io::Write;

use log::warn;

use crate::error::SinkFailure;
use super::event::TraceEvent;

/// Append-only, ordered destination for trace events.
pub trait TraceSink {
    fn append(&mut self, event: &TraceEvent) -> Result<(), SinkFailure>;
    /// Release the sink. Called exactly once by the owning tracer.
    fn close(&mut self);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn append(&mut self, event: &TraceEvent) -> Result<(), SinkFailure> {
        (**self).append(event)
    }
    fn close(&mut self) {
        (**self).close()
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn append(&mut self, event: &TraceEvent) -> Result<(), SinkFailure> {
        (**self).append(event)
    }
    fn close(&mut self) {
        (**self).close()
    }
}

/// Writes one line per event to any [`Write`].
///
/// Each event is written and flushed before `append` returns, so a failing
/// writer is reported on the append that lost the event.
pub struct WriterSink<W: Write> {
    out: W,
    closed: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, closed: false }
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn append(&mut self, event: &TraceEvent) -> Result<(), SinkFailure> {
        if self.closed {
            return Err(SinkFailure::Closed);
        }
        let line = format!("{}\n", event);
        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.out.flush() {
            warn!("flushing trace output failed: {}", e);
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Default, Debug)]
pub struct VecSink {
    events: Vec<TraceEvent>,
    closed: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TraceSink for VecSink {
    fn append(&mut self, event: &TraceEvent) -> Result<(), SinkFailure> {
        if self.closed {
            return Err(SinkFailure::Closed);
        }
        self.events.push(*event);
        Ok(())
    }
    fn close(&mut self) {
        self.closed = true;
    }
}
