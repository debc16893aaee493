use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOp {
    Read,
    Write,
}

/// One access seen by a traced cache. Position in the sink is its only
/// ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub op: TraceOp,
    pub address: u32,
    pub length: u32,    // addressable units, > 0
}

impl TraceEvent {
    pub fn new(op: TraceOp, address: u32, length: u32) -> Self {
        Self { op, address, length }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            TraceOp::Read => 'r',
            TraceOp::Write => 'w',
        };
        write!(f, "{} {:#010x} {}", op, self.address, self.length)
    }
}
