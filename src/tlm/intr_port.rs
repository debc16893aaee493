use log::{trace, warn};

use crate::error::TransportError;
use super::handler::InterruptHandler;
use super::protocol::*;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortStats {
    pub served: u64,
    pub failed: u64,
}

/// Slave side of an interrupt connection.
///
/// Every call to [`transport`](Self::transport) yields exactly one response
/// and performs at most one handler operation. Failures never escape as
/// errors; they come back as [`Status::Error`].
pub struct InterruptTransportEndpoint<H: InterruptHandler> {
    name: String,
    handler: H,
    stats: PortStats,
}

impl<H: InterruptHandler> InterruptTransportEndpoint<H> {
    pub fn new(name: impl Into<String>, handler: H) -> Self {
        Self {
            name: name.into(),
            handler,
            stats: PortStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn handler(&self) -> &H {
        &self.handler
    }
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
    pub fn into_handler(self) -> H {
        self.handler
    }
    pub fn stats(&self) -> PortStats {
        self.stats
    }

    pub fn transport(&mut self, req: InterruptRequest) -> InterruptResponse {
        let rsp = match self.dispatch(&req) {
            Ok(payload) => {
                self.stats.served += 1;
                InterruptResponse::ok(payload)
            }
            Err(err) => {
                self.stats.failed += 1;
                warn!("{}: {} rejected: {}", self.name, req, err);
                InterruptResponse::error()
            }
        };
        trace!("{}: {} -> {}", self.name, req, rsp);
        rsp
    }

    // decode, validate, then exactly one handler operation
    fn dispatch(&mut self, req: &InterruptRequest) -> Result<u32, TransportError> {
        let action = req.decode()?;
        let line = req.target_id;
        if !self.handler.recognizes(line) {
            return Err(TransportError::UnknownTarget(line));
        }
        match action {
            Action::Assert => {
                self.handler.assert(line, req.payload)?;
                Ok(req.payload)
            }
            Action::Clear => {
                self.handler.clear(line)?;
                Ok(req.payload)
            }
            Action::Query => Ok(self.handler.status(line)?),
        }
    }
}
