use log::{debug, warn};
use asynchronix::model::{Model, Output};

use crate::config::SimConfig;
use crate::trace::{AccessTracer, TraceOp, TraceSink, TraceStats};
use super::common::*;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub traced: u64,
    pub tracing: bool,
}

#[derive(Clone)]
struct CacheSet {
    //          tag   last used
    blocks: Vec<(u32, u32)>,
    assoc: usize,
    mru_ctr: u32,
}

impl CacheSet {
    fn new(assoc: usize) -> Self {
        Self { blocks: Vec::with_capacity(assoc), assoc, mru_ctr: 0 }
    }
    /// touch the block holding `tag`, loading it over the LRU block on a miss
    fn access(&mut self, tag: u32) -> bool {
        self.mru_ctr += 1;
        if let Some(block) = self.blocks.iter_mut().find(|(t, _)| *t == tag) {
            block.1 = self.mru_ctr;
            return true;
        }
        if self.blocks.len() < self.assoc {
            self.blocks.push((tag, self.mru_ctr));
        } else if let Some(lru) = self.blocks.iter_mut().min_by_key(|(_, last_used)| *last_used) {
            *lru = (tag, self.mru_ctr);
        }
        false
    }
}

/// Set-associative LRU cache that reports every access to its tracer.
pub struct TracedCache<S: TraceSink> {
    pub id: u32,
    config: SimConfig,
    sets: Vec<CacheSet>,
    tracer: Option<AccessTracer<S>>,
    stats: CacheStats,
    pub o_proc_resp: Output<CacheProcResp>,
}

impl<S: TraceSink + Send + 'static> TracedCache<S> {
    pub fn new(id: u32, config: SimConfig, sink: S) -> Self {
        let sets = vec![CacheSet::new(config.cache_assoc as usize); config.num_sets() as usize];
        Self {
            id,
            config,
            sets,
            tracer: Some(AccessTracer::new(sink)),
            stats: CacheStats { tracing: true, ..CacheStats::default() },
            o_proc_resp: Output::new(),
        }
    }

    // helper functions

    fn lookup(&mut self, addr: Addr) -> bool {
        let (index, tag) = self.config.pos(addr.0);
        let hit = self.sets[index as usize].access(tag);
        if hit { self.stats.hits += 1; } else { self.stats.misses += 1; }
        hit
    }
    fn trace(&mut self, op: TraceOp, addr: Addr) {
        let failed = match self.tracer.as_mut() {
            Some(tracer) => tracer.record(op, addr.0, self.config.word_size).err(),
            None => return,
        };
        match failed {
            None => self.stats.traced += 1,
            Some(e) => {
                // tracing is optional here, the cache keeps running without it
                warn!("cache {}: disabling trace: {}", self.id, e);
                self.tracer = None;
                self.stats.tracing = false;
            }
        }
    }

    // inputs

    pub async fn on_proc_req(&mut self, req: ProcCacheReq) {
        let (op, addr) = match req {
            ProcCacheReq::Read(addr) => (TraceOp::Read, addr),
            ProcCacheReq::Write(addr) => (TraceOp::Write, addr),
        };
        let hit = self.lookup(addr);
        debug!("cache {}: {:?} {:#x} {}", self.id, op, addr.0, if hit { "hit" } else { "miss" });
        self.trace(op, addr);
        self.o_proc_resp.send(CacheProcResp::RequestResolved { hit }).await;
    }

    // queries

    pub async fn on_stats(&mut self, _: ()) -> CacheStats {
        self.stats
    }
    /// Stop tracing and release the sink. Returns `None` if tracing had
    /// already stopped.
    pub async fn on_finish_trace(&mut self, _: ()) -> Option<TraceStats> {
        self.stats.tracing = false;
        self.tracer.take().map(AccessTracer::finish)
    }
}

impl<S: TraceSink + Send + 'static> Model for TracedCache<S> {}
