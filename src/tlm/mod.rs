mod handler;
mod intr_port;
mod protocol;

pub use handler::{InterruptHandler, InterruptLines};
pub use intr_port::{InterruptTransportEndpoint, PortStats};
pub use protocol::*;
