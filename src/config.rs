use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::args::Args;

pub const DEFAULT_PACKET_SIZE_BYTES: u64 = 1000;
pub const DEFAULT_HISTOGRAM_PATH: &str = "latency_histogram.png";
pub const DEFAULT_THROUGHPUT_PATH: &str = "throughput_graph.png";
pub const DEFAULT_MAX_LOST_SHOWN: usize = 20;
pub const HISTOGRAM_BINS: usize = 30;
pub const PROFILE_ENV: &str = "UDP_TRACE_PROFILE";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub log_file: PathBuf,
    pub packet_size_bytes: u64,
    /// `None` skips the chart.
    pub histogram_out: Option<PathBuf>,
    pub throughput_out: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
    pub max_lost_shown: usize,
    pub profile: bool,
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.packet_size == 0 {
            bail!("packet size must be at least 1 byte");
        }
        let (histogram_out, throughput_out) = match args.no_charts {
            true => (None, None),
            false => (Some(args.histogram_out), Some(args.throughput_out)),
        };

        Ok(Self {
            log_file: args.log_file,
            packet_size_bytes: args.packet_size,
            histogram_out,
            throughput_out,
            json_out: args.json_out,
            max_lost_shown: args.max_lost_shown,
            profile: profile_enabled(),
        })
    }
}

fn profile_enabled() -> bool {
    std::env::var(PROFILE_ENV)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
