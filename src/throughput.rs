use log::{debug, warn};
use std::collections::BTreeMap;

use crate::model::ThroughputReport;

fn to_mbps(packets: usize, packet_size_bytes: u64) -> f64 {
    (packets as f64) * (packet_size_bytes as f64) * 8.0 / 1_000_000.0
}

/// Overall and per-second throughput by send time.
///
/// Each record counts as one packet of `packet_size_bytes`, duplicates
/// included. Buckets are half-open `[s, s + 1)` seconds; empty seconds are left
/// out of `per_second`. The overall figure is `None` when every packet shares
/// one timestamp.
pub fn calculate_throughput(
    sequences: &[u64],
    send_timestamps: &[f64],
    packet_size_bytes: u64,
) -> ThroughputReport {
    if sequences.is_empty() || send_timestamps.is_empty() {
        return ThroughputReport::default();
    }
    if sequences.len() != send_timestamps.len() {
        warn!(
            "sequence/timestamp column mismatch ({} vs {}), skipping throughput",
            sequences.len(),
            send_timestamps.len()
        );
        return ThroughputReport::default();
    }

    let mut pairs: Vec<(u64, f64)> = sequences
        .iter()
        .copied()
        .zip(send_timestamps.iter().copied())
        .collect();
    pairs.sort_by(|a, b| a.1.total_cmp(&b.1));

    let first_ts = pairs[0].1;
    let last_ts = pairs[pairs.len() - 1].1;
    let duration = last_ts - first_ts;
    let overall_mbps = match duration > 0.0 {
        true => {
            let total_bits = (pairs.len() as f64) * (packet_size_bytes as f64) * 8.0;
            Some(total_bits / duration / 1_000_000.0)
        }
        false => None,
    };

    // Sorted input means every floor() lands in [floor(first), floor(last) + 1).
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for (_, ts) in &pairs {
        *counts.entry(ts.floor() as i64).or_insert(0) += 1;
    }
    debug!(
        "{} packets over {} non-empty seconds ({:.3}s span)",
        pairs.len(),
        counts.len(),
        duration
    );

    let per_second = counts
        .into_iter()
        .map(|(second, n)| (second, to_mbps(n, packet_size_bytes)))
        .collect();

    ThroughputReport {
        overall_mbps,
        per_second,
    }
}

/// Busiest second. Ties go to the earliest second.
pub fn peak_second(per_second: &BTreeMap<i64, f64>) -> Option<(i64, f64)> {
    let mut best: Option<(i64, f64)> = None;
    for (&second, &mbps) in per_second {
        match best {
            Some((_, cur)) if mbps <= cur => {}
            _ => best = Some((second, mbps)),
        }
    }
    best
}

/// Quietest non-empty second. Ties go to the earliest second.
pub fn lowest_second(per_second: &BTreeMap<i64, f64>) -> Option<(i64, f64)> {
    let mut best: Option<(i64, f64)> = None;
    for (&second, &mbps) in per_second {
        match best {
            Some((_, cur)) if mbps >= cur => {}
            _ => best = Some((second, mbps)),
        }
    }
    best
}
