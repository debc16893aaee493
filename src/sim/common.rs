use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Addr(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instr {
    Read(Addr),
    Write(Addr),
}

pub type Insts = VecDeque<Instr>;

// MESSAGE TYPES

#[derive(Clone, Debug)]
pub enum ProcCacheReq {
    Read(Addr),
    Write(Addr),
}

#[derive(Clone, Debug)]
pub enum CacheProcResp {
    RequestResolved { hit: bool },
}
