//! asynchronix models that embed the interrupt endpoint and the access
//! tracer in a ticked simulation.

mod cache;
mod common;
mod intr;
mod processor;

pub use cache::{CacheStats, TracedCache};
pub use common::*;
pub use intr::{IntrPort, IntrSource, SourceStats};
pub use processor::{ProcState, Processor};
