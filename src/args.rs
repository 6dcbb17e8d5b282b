use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    DEFAULT_HISTOGRAM_PATH, DEFAULT_MAX_LOST_SHOWN, DEFAULT_PACKET_SIZE_BYTES,
    DEFAULT_THROUGHPUT_PATH,
};

#[derive(Parser, Debug)]
#[command(about = "Analyze UDP test logs: packet loss, latency and throughput")]
pub struct Args {
    /// Server debug log with `Seq=.., Send_ts=.., Latency=.. ms` lines
    #[arg(short = 'l', long = "log-file")]
    pub log_file: PathBuf,

    /// Size of each packet in bytes
    #[arg(short = 's', long = "packet-size", default_value_t = DEFAULT_PACKET_SIZE_BYTES)]
    pub packet_size: u64,

    /// Output path of the latency histogram
    #[arg(long = "histogram-out", default_value = DEFAULT_HISTOGRAM_PATH)]
    pub histogram_out: PathBuf,

    /// Output path of the throughput-over-time chart
    #[arg(long = "throughput-out", default_value = DEFAULT_THROUGHPUT_PATH)]
    pub throughput_out: PathBuf,

    /// Do not render charts
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Also write the full analysis as JSON (optional)
    #[arg(long = "json-out")]
    pub json_out: Option<PathBuf>,

    /// Print at most N lost sequence numbers
    #[arg(long = "max-lost-shown", default_value_t = DEFAULT_MAX_LOST_SHOWN)]
    pub max_lost_shown: usize,
}
