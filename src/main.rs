mod analyzer;
mod args;
mod bitmap;
mod config;
mod io_utils;
mod loss;
mod model;
mod parser;
mod plot;
mod report;
mod stats;
mod throughput;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::time::Instant;

use analyzer::analyze_trace;
use args::Args;
use config::{RunConfig, HISTOGRAM_BINS};
use io_utils::{load_trace, write_json_report};
use plot::{plot_latency_histogram, plot_throughput};
use report::render_report;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = RunConfig::from_args(Args::parse())?;
    let stdout = io::stdout();
    run(&cfg, &mut stdout.lock())
}

/// Load, analyze and report one trace. A trace without packet records is not
/// an error: the message goes to `out` and nothing else is produced.
fn run(cfg: &RunConfig, out: &mut impl Write) -> Result<()> {
    let t0 = Instant::now();

    writeln!(out, "Parsing log file: {}", cfg.log_file.display())?;
    let t_load = Instant::now();
    let trace = load_trace(&cfg.log_file)?;
    if cfg.profile {
        eprintln!("[profile] load_trace: {:.3}s", t_load.elapsed().as_secs_f64());
    }

    if trace.is_empty() {
        writeln!(out, "No packet sequence data found")?;
        return Ok(());
    }

    let t_analyze = Instant::now();
    let analysis = analyze_trace(&trace, cfg.packet_size_bytes);
    if cfg.profile {
        eprintln!("[profile] analyze_trace: {:.3}s", t_analyze.elapsed().as_secs_f64());
    }

    write!(out, "{}", render_report(&analysis, cfg.max_lost_shown))?;

    let t_output = Instant::now();
    if let Some(path) = &cfg.throughput_out {
        if !analysis.throughput.per_second.is_empty() {
            plot_throughput(&analysis.throughput.per_second, path)?;
            writeln!(out, "\nThroughput graph saved to '{}'", path.display())?;
        }
    }
    if let Some(path) = &cfg.histogram_out {
        plot_latency_histogram(trace.latencies(), HISTOGRAM_BINS, path)?;
        writeln!(out, "\nLatency histogram saved to '{}'", path.display())?;
    }
    if let Some(path) = &cfg.json_out {
        write_json_report(path, &analysis)?;
    }
    if cfg.profile {
        eprintln!("[profile] charts/json: {:.3}s", t_output.elapsed().as_secs_f64());
        eprintln!("[profile] total main: {:.3}s", t0.elapsed().as_secs_f64());
    }

    Ok(())
}
