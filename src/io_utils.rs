use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use crate::model::{Trace, TraceAnalysis};
use crate::parser::parse_trace;

pub fn load_trace(path: &Path) -> Result<Trace> {
    let file = File::open(path).with_context(|| format!("failed to open log {}", path.display()))?;
    let trace = parse_trace(BufReader::new(file))
        .with_context(|| format!("failed to read log {}", path.display()))?;
    info!("loaded {} packet records from {}", trace.len(), path.display());
    Ok(trace)
}

pub fn write_json_report(path: &Path, analysis: &TraceAnalysis) -> Result<()> {
    let data = serde_json::to_vec_pretty(analysis).context("serialize analysis to JSON")?;
    fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    info!("JSON report written to {}", path.display());
    Ok(())
}
