use crate::loss::analyze_packet_loss;
use crate::model::{Trace, TraceAnalysis};
use crate::stats::analyze_latency;
use crate::throughput::calculate_throughput;

/// Run loss, latency and throughput analysis over one parsed trace.
///
/// The analyzers only read their own columns, so they run side by side.
pub fn analyze_trace(trace: &Trace, packet_size_bytes: u64) -> TraceAnalysis {
    let (loss, (latency, throughput)) = rayon::join(
        || analyze_packet_loss(trace.sequences()),
        || {
            rayon::join(
                || analyze_latency(trace.latencies()),
                || {
                    calculate_throughput(
                        trace.sequences(),
                        trace.send_timestamps(),
                        packet_size_bytes,
                    )
                },
            )
        },
    );

    // The sender numbers packets from 0.
    let total_packets = trace
        .sequences()
        .iter()
        .copied()
        .max()
        .map(|m| m.saturating_add(1))
        .unwrap_or(0);

    TraceAnalysis {
        total_packets,
        received_packets: trace.len(),
        packet_size_bytes,
        loss,
        latency,
        throughput,
    }
}
