use log::info;
use asynchronix::model::{Model, Requestor};

use crate::tlm::*;

/// Registers an [`InterruptTransportEndpoint`] with the simulation: other
/// models reach it by connecting a requestor to [`IntrPort::on_transport`].
pub struct IntrPort<H: InterruptHandler> {
    endpoint: InterruptTransportEndpoint<H>,
}

impl<H: InterruptHandler + Send + 'static> IntrPort<H> {
    pub fn new(endpoint: InterruptTransportEndpoint<H>) -> Self {
        Self { endpoint }
    }

    // inputs

    pub async fn on_transport(&mut self, req: InterruptRequest) -> InterruptResponse {
        self.endpoint.transport(req)
    }

    // queries

    pub async fn on_stats(&mut self, _: ()) -> PortStats {
        self.endpoint.stats()
    }
}

impl IntrPort<InterruptLines> {
    pub async fn on_pending(&mut self, _: ()) -> Vec<LineId> {
        self.endpoint.handler().pending()
    }
}

impl<H: InterruptHandler + Send + 'static> Model for IntrPort<H> {}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceStats {
    pub acked: u64,
    pub nacked: u64,
}

/// Device that raises and drops interrupt lines round-robin, one transition
/// every `period` ticks.
pub struct IntrSource {
    period: u32,
    lines: u32,
    ticks: u32,
    next: LineId,
    asserted: Option<LineId>,
    stats: SourceStats,
    pub r_intr: Requestor<InterruptRequest, InterruptResponse>,
}

impl IntrSource {
    pub fn new(period: u32, lines: u32) -> Self {
        Self {
            period,
            lines,
            ticks: 0,
            next: 0,
            asserted: None,
            stats: SourceStats::default(),
            r_intr: Requestor::new(),
        }
    }

    // helper functions

    async fn send(&mut self, req: InterruptRequest) {
        info!("sending {}", req);
        for rsp in self.r_intr.send(req).await {
            if rsp.is_ok() { self.stats.acked += 1; } else { self.stats.nacked += 1; }
        }
    }

    // inputs

    pub async fn on_tick(&mut self, _: ()) {
        self.ticks += 1;
        if self.period == 0 || self.lines == 0 || self.ticks % self.period != 0 {
            return;
        }
        let req = match self.asserted.take() {
            Some(line) => InterruptRequest::clear(line),
            None => {
                let line = self.next;
                self.next = (self.next + 1) % self.lines;
                self.asserted = Some(line);
                InterruptRequest::assert(line, line + 1)
            }
        };
        self.send(req).await;
    }

    // queries

    pub async fn on_stats(&mut self, _: ()) -> SourceStats {
        self.stats
    }
}

impl Model for IntrSource {}
