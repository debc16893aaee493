use log::info;
use asynchronix::model::{Model, Output};

use super::common::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProcState {
    #[default]
    Idle,
    WaitingForCache,
    Done,
}

/// Issues its instruction stream to the cache, one access at a time.
pub struct Processor {
    pub id: u32,
    state: ProcState,
    insts: Insts,
    issued: u64,
    pub o_cache_req: Output<ProcCacheReq>,
}

impl Processor {
    pub fn new(id: u32, insts: Insts) -> Self {
        Processor {
            id,
            state: ProcState::Idle,
            insts,
            issued: 0,
            o_cache_req: Output::new(),
        }
    }

    // inputs

    pub async fn on_tick(&mut self, _: ()) {
        if self.state != ProcState::Idle {
            return;
        }
        let req = match self.insts.pop_front() {
            Some(Instr::Read(addr)) => ProcCacheReq::Read(addr),
            Some(Instr::Write(addr)) => ProcCacheReq::Write(addr),
            None => {
                info!("processor {} done after {} accesses", self.id, self.issued);
                self.state = ProcState::Done;
                return;
            }
        };
        self.issued += 1;
        self.state = ProcState::WaitingForCache;
        self.o_cache_req.send(req).await;
    }
    pub async fn on_cache_resp(&mut self, _: CacheProcResp) {
        self.state = ProcState::Idle;
    }

    // queries

    pub async fn on_state(&mut self, _: ()) -> ProcState {
        self.state
    }
}

impl Model for Processor {}
