use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use asynchronix::simulation::{Mailbox, SimInit};
use asynchronix::time::MonotonicTime;
use clap::Parser;
use env_logger::Env;
use log::info;

use tlmsim::sim::*;
use tlmsim::{InterruptLines, InterruptTransportEndpoint, SimConfig, TraceSink, WriterSink};

type Sink = Box<dyn TraceSink + Send>;

#[derive(Parser)]
#[command(name = "tlmsim", version, about = "Interrupt transport and cache trace demo")]
struct Cli {
    /// Number of interrupt lines behind the port
    #[arg(long, default_value_t = SimConfig::default().irq_lines)]
    irq_lines: u32,
    /// Cycles between interrupt transitions
    #[arg(long, default_value_t = SimConfig::default().irq_period)]
    irq_period: u32,
    /// Maximum number of simulated cycles
    #[arg(long, default_value_t = SimConfig::default().cycles)]
    cycles: u64,
    /// Cache size in bytes
    #[arg(long, default_value_t = SimConfig::default().cache_size)]
    cache_size: u32,
    /// Associativity in blocks
    #[arg(long, default_value_t = SimConfig::default().cache_assoc)]
    cache_assoc: u32,
    /// Block size in bytes
    #[arg(long, default_value_t = SimConfig::default().block_size)]
    block_size: u32,
    /// Number of accesses issued by the processor
    #[arg(long, default_value_t = 256)]
    accesses: u32,
    /// Write the access trace here instead of stdout
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl From<Cli> for SimConfig {
    fn from(cli: Cli) -> Self {
        SimConfig {
            irq_lines: cli.irq_lines,
            irq_period: cli.irq_period,
            cycles: cli.cycles,
            cache_size: cli.cache_size,
            cache_assoc: cli.cache_assoc,
            block_size: cli.block_size,
            trace_path: cli.trace,
            ..SimConfig::default()
        }
    }
}

// strided walk over twice the cache size, every third access a write
fn workload(config: &SimConfig, n: u32) -> Insts {
    let span = (u64::from(config.cache_size) * 2).min(1 << 32);
    let stride = u64::from(config.word_size) * 7;
    (0..n)
        .map(|i| {
            // span is at most 2^32, so the remainder fits in a u32
            let addr = Addr((u64::from(i).wrapping_mul(stride) % span) as u32);
            if i % 3 == 2 { Instr::Write(addr) } else { Instr::Read(addr) }
        })
        .collect()
}

fn open_sink(config: &SimConfig) -> anyhow::Result<Sink> {
    let sink: Sink = match &config.trace_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create trace file {}", path.display()))?;
            Box::new(WriterSink::new(file))
        }
        None => Box::new(WriterSink::new(io::stdout())),
    };
    Ok(sink)
}

fn main() -> anyhow::Result<()> {
    // logging
    let env = Env::default()
        .filter_or("TLMSIM_LOG_LEVEL", "info")
        .write_style_or("TLMSIM_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let cli = Cli::parse();
    let accesses = cli.accesses;
    let config = SimConfig::from(cli);
    config.validate()?;

    // create models
    let handler = InterruptLines::new(config.irq_lines as usize);
    let port = IntrPort::new(InterruptTransportEndpoint::new("intr0", handler));
    let mut source = IntrSource::new(config.irq_period, config.irq_lines);
    let mut proc = Processor::new(0, workload(&config, accesses));
    let mut cache = TracedCache::<Sink>::new(0, config.clone(), open_sink(&config)?);

    // create mailboxes
    let port_mbox = Mailbox::<IntrPort<InterruptLines>>::new();
    let source_mbox = Mailbox::<IntrSource>::new();
    let proc_mbox = Mailbox::<Processor>::new();
    let cache_mbox = Mailbox::<TracedCache<Sink>>::new();

    // addresses
    let port_addr = port_mbox.address();
    let source_addr = source_mbox.address();
    let proc_addr = proc_mbox.address();
    let cache_addr = cache_mbox.address();

    // connect models
    source.r_intr.connect(IntrPort::<InterruptLines>::on_transport, &port_mbox);
    proc.o_cache_req.connect(TracedCache::<Sink>::on_proc_req, &cache_mbox);
    cache.o_proc_resp.connect(Processor::on_cache_resp, &proc_mbox);

    // initialize simulation
    let mut sim = SimInit::new()
        .add_model(port, port_mbox)
        .add_model(source, source_mbox)
        .add_model(proc, proc_mbox)
        .add_model(cache, cache_mbox)
        .init(MonotonicTime::EPOCH);

    // run simulation
    for _ in 0..config.cycles {
        if sim.send_query(Processor::on_state, (), &proc_addr)? == ProcState::Done {
            break;
        }
        sim.send_event(IntrSource::on_tick, (), &source_addr);
        sim.send_event(Processor::on_tick, (), &proc_addr);
        sim.step_by(Duration::from_secs(1));
    }

    // teardown releases the trace sink
    let trace = sim.send_query(TracedCache::<Sink>::on_finish_trace, (), &cache_addr)?;
    let cache_stats = sim.send_query(TracedCache::<Sink>::on_stats, (), &cache_addr)?;
    let port_stats = sim.send_query(IntrPort::<InterruptLines>::on_stats, (), &port_addr)?;
    let source_stats = sim.send_query(IntrSource::on_stats, (), &source_addr)?;
    let pending = sim.send_query(IntrPort::<InterruptLines>::on_pending, (), &port_addr)?;

    // print stats
    info!("finished simulation in {} cycles", sim.time().as_secs());
    eprintln!("cache: {} hits, {} misses", cache_stats.hits, cache_stats.misses);
    match trace {
        Some(t) => eprintln!("trace: {} events recorded, {} failed", t.recorded, t.failures),
        None => eprintln!("trace: disabled during run ({} events recorded)", cache_stats.traced),
    }
    eprintln!("intr port: {} served, {} failed; source saw {} acks, {} nacks; pending lines {:?}",
        port_stats.served, port_stats.failed, source_stats.acked, source_stats.nacked, pending);
    Ok(())
}
