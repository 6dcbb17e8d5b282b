use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    pub sequence: u64,
    pub send_timestamp: f64,
    pub latency_ms: f64,
}

/// Parsed trace, stored as three aligned columns in file order.
///
/// Records only enter through [`Trace::push`], so index `i` in every column
/// always refers to the same log line.
#[derive(Debug, Default, Clone)]
pub struct Trace {
    sequences: Vec<u64>,
    send_timestamps: Vec<f64>,
    latencies: Vec<f64>,
}

impl Trace {
    pub fn push(&mut self, record: LogRecord) {
        self.sequences.push(record.sequence);
        self.send_timestamps.push(record.send_timestamp);
        self.latencies.push(record.latency_ms);
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self) -> &[u64] {
        &self.sequences
    }

    pub fn send_timestamps(&self) -> &[f64] {
        &self.send_timestamps
    }

    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }
}

impl FromIterator<LogRecord> for Trace {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        let mut trace = Trace::default();
        for record in iter {
            trace.push(record);
        }
        trace
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discontinuity {
    pub gap_start: u64,
    pub gap_end: u64,
    /// Number of sequences strictly between `gap_start` and `gap_end`.
    pub lost: u64,
    /// The missing sequences, ascending; capped for very wide gaps.
    pub missing: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LossReport {
    pub loss_rate: f64,
    pub lost_count: u64,
    /// Ascending; holds only the first entries when `lost_count` is huge.
    pub lost_sequences: Vec<u64>,
    pub discontinuities: Vec<Discontinuity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySummary {
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThroughputReport {
    /// `None` when the trace spans zero seconds.
    pub overall_mbps: Option<f64>,
    /// Sparse: seconds without any sent packet have no entry and mean 0 Mbps.
    pub per_second: BTreeMap<i64, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceAnalysis {
    pub total_packets: u64,
    pub received_packets: usize,
    pub packet_size_bytes: u64,
    pub loss: LossReport,
    pub latency: Option<LatencySummary>,
    pub throughput: ThroughputReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_columns_aligned() {
        let trace: Trace = [
            LogRecord { sequence: 3, send_timestamp: 1.5, latency_ms: 0.2 },
            LogRecord { sequence: 3, send_timestamp: 1.6, latency_ms: 0.4 },
        ]
        .into_iter()
        .collect();

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.sequences(), &[3, 3]);
        assert_eq!(trace.send_timestamps(), &[1.5, 1.6]);
        assert_eq!(trace.latencies(), &[0.2, 0.4]);
    }
}
