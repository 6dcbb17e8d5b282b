use prettytable::{Cell, Row, Table};
use std::fmt::{self, Write};

use crate::model::{Discontinuity, LatencySummary, ThroughputReport, TraceAnalysis};
use crate::throughput::{lowest_second, peak_second};

/// Render the console report. The output depends only on `analysis`, so the
/// same trace always produces the same text.
pub fn render_report(analysis: &TraceAnalysis, max_lost_shown: usize) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_report(&mut out, analysis, max_lost_shown);
    out
}

fn write_report(out: &mut String, analysis: &TraceAnalysis, max_lost_shown: usize) -> fmt::Result {
    write_loss_section(out, analysis, max_lost_shown)?;
    write_latency_section(out, analysis.latency.as_ref())?;
    write_throughput_section(out, &analysis.throughput, analysis.packet_size_bytes)
}

fn write_loss_section(out: &mut String, analysis: &TraceAnalysis, max_lost_shown: usize) -> fmt::Result {
    let loss = &analysis.loss;
    writeln!(out, "\nPacket Loss Analysis:")?;
    writeln!(out, "Total packets: {}", analysis.total_packets)?;
    writeln!(out, "Received packets: {}", analysis.received_packets)?;
    writeln!(out, "Packet loss rate: {:.2}%", loss.loss_rate * 100.0)?;

    if loss.discontinuities.is_empty() {
        writeln!(out, "\nAll sequences are continuous, no packet loss detected")?;
    } else {
        writeln!(out, "\nSequence Discontinuities (Packet Loss):")?;
        write!(out, "{}", discontinuity_table(&loss.discontinuities))?;
    }

    if loss.lost_count > 0 {
        writeln!(
            out,
            "Lost packet sequences: {}",
            truncated_list(&loss.lost_sequences, loss.lost_count, max_lost_shown)
        )?;
    }
    Ok(())
}

fn discontinuity_table(discontinuities: &[Discontinuity]) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("Gap start"),
        Cell::new("Gap end"),
        Cell::new("Lost"),
        Cell::new("Missing sequences"),
    ]));
    for d in discontinuities {
        let missing = match d.missing.len() as u64 == d.lost {
            true => format!("{:?}", d.missing),
            false => format!("{:?}...", d.missing),
        };
        table.add_row(Row::new(vec![
            Cell::new(&d.gap_start.to_string()),
            Cell::new(&d.gap_end.to_string()),
            Cell::new(&d.lost.to_string()),
            Cell::new(&missing),
        ]));
    }
    table
}

/// `values` holds the first entries of `total`. The list is cut to `limit`
/// and marked with `...` once `total` reaches `limit`.
fn truncated_list(values: &[u64], total: u64, limit: usize) -> String {
    if total < limit as u64 {
        return format!("{:?}", values);
    }
    format!("{:?}...", &values[..limit.min(values.len())])
}

fn write_latency_section(out: &mut String, latency: Option<&LatencySummary>) -> fmt::Result {
    writeln!(out, "\nLatency Analysis:")?;
    let Some(s) = latency else {
        return writeln!(out, "No latency data");
    };

    let mut table = Table::new();
    table.set_titles(Row::new(vec![Cell::new("metric"), Cell::new("value")]));
    for (name, value, unit) in [
        ("Mean latency", s.mean, "ms"),
        ("Latency variance", s.variance, "ms²"),
        ("Minimum latency", s.min, "ms"),
        ("Maximum latency", s.max, "ms"),
    ] {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&format!("{:.6} {}", value, unit)),
        ]));
    }
    write!(out, "{}", table)
}

fn write_throughput_section(out: &mut String, throughput: &ThroughputReport, packet_size: u64) -> fmt::Result {
    writeln!(out, "\nThroughput Analysis (packet size: {} Bytes):", packet_size)?;
    match throughput.overall_mbps {
        Some(v) => writeln!(out, "Overall average throughput: {:.2} Mbps", v)?,
        None => writeln!(out, "Overall average throughput: N/A (duration is 0)")?,
    }

    if let Some((second, mbps)) = peak_second(&throughput.per_second) {
        writeln!(out, "Maximum throughput: {:.2} Mbps (at second {})", mbps, second)?;
    }
    if let Some((second, mbps)) = lowest_second(&throughput.per_second) {
        writeln!(out, "Minimum throughput: {:.2} Mbps (at second {})", mbps, second)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_trace;
    use crate::parser::parse_trace;

    const LOG: &str = "\
Seq=0, Send_ts=1000.10, Latency=1.000 ms
Seq=1, Send_ts=1000.40, Latency=2.000 ms
Seq=4, Send_ts=1001.20, Latency=3.000 ms
Seq=5, Send_ts=1002.90, Latency=2.000 ms
";

    #[test]
    fn test_render_report() {
        let trace = parse_trace(LOG.as_bytes()).unwrap();
        let text = render_report(&analyze_trace(&trace, 1000), 20);

        assert!(text.contains("Total packets: 6"));
        assert!(text.contains("Received packets: 4"));
        assert!(text.contains("Packet loss rate: 33.33%"));
        assert!(text.contains("[2, 3]"));
        assert!(!text.contains("[2, 3]..."));
        assert!(text.contains("Lost packet sequences: [2, 3]"));
        assert!(text.contains("2.000000 ms"));
        assert!(text.contains("Maximum throughput: 0.02 Mbps (at second 1000)"));
        assert!(text.contains("Minimum throughput: 0.01 Mbps (at second 1001)"));
    }

    #[test]
    fn test_render_report_is_repeatable() {
        let first = render_report(&analyze_trace(&parse_trace(LOG.as_bytes()).unwrap(), 1000), 20);
        let second = render_report(&analyze_trace(&parse_trace(LOG.as_bytes()).unwrap(), 1000), 20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_continuous_and_zero_duration() {
        let trace = parse_trace("Seq=0, Send_ts=7.0, Latency=1.0 ms\n".as_bytes()).unwrap();
        let text = render_report(&analyze_trace(&trace, 1000), 20);
        assert!(text.contains("All sequences are continuous, no packet loss detected"));
        assert!(text.contains("N/A (duration is 0)"));
        assert!(!text.contains("Lost packet sequences"));
    }

    #[test]
    fn test_truncated_list() {
        assert_eq!(truncated_list(&[1, 2, 3], 3, 4), "[1, 2, 3]");
        assert_eq!(truncated_list(&[1, 2, 3, 4], 4, 2), "[1, 2]...");
    }

    #[test]
    fn test_wide_gap_is_marked_truncated() {
        let trace = parse_trace("Seq=0, Send_ts=1.0, Latency=1.0 ms\nSeq=18446744073709551615, Send_ts=2.0, Latency=1.0 ms\n".as_bytes()).unwrap();
        let text = render_report(&analyze_trace(&trace, 1000), 20);
        assert!(text.contains("18446744073709551614"));
        assert!(text.contains("Lost packet sequences: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20]..."));
    }

    #[test]
    fn test_truncated_list_at_exact_limit() {
        assert_eq!(truncated_list(&[1, 2, 3], 3, 3), "[1, 2, 3]...");
    }

    #[test]
    fn test_truncated_list_partial_values() {
        // Only the first two of a million lost sequences were materialized.
        assert_eq!(truncated_list(&[7, 8], 1_000_000, 20), "[7, 8]...");
    }
}
