//! Re-check a recorded bus trace against a link description.
//!
//! The trace is a JSON array of tick records; each record holds the
//! messages that fired that tick, keyed `a` through `e`, and omits
//! channels that stayed idle. Exits non-zero iff any tick raised a fault.

use anyhow::Context;
use clap::Parser;
use config::{LinkDescription, LinkEdge};
use monitor::Monitor;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use types::TickSnapshot;

#[derive(Parser)]
#[command(
    name = "replay",
    about = "Re-check a recorded bus trace against a link description"
)]
struct Args {
    /// Link description TOML file
    #[arg(long)]
    link: PathBuf,

    /// Trace file: a JSON array of tick records
    trace: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(faults) => {
            eprintln!("{faults} protocol fault(s) detected");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("replay failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<usize> {
    let desc = LinkDescription::from_toml_file(&args.link)?;
    let edge = LinkEdge::new(desc)?;

    let text = std::fs::read_to_string(&args.trace)
        .with_context(|| format!("reading trace {}", args.trace.display()))?;
    let ticks: Vec<TickSnapshot> =
        serde_json::from_str(&text).context("parsing trace JSON")?;

    let mut mon = Monitor::new(edge).with_label(args.trace.display().to_string());
    let mut total = 0usize;
    for (index, tick) in ticks.iter().enumerate() {
        for fault in mon.check_tick(tick) {
            println!("tick {index}: {fault}");
            total += 1;
        }
    }

    if total == 0 {
        println!("{} ticks conform", ticks.len());
    }
    Ok(total)
}
