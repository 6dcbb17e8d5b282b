use log::warn;

use crate::bitmap::Bitmap;
use crate::model::{Discontinuity, LossReport};

/// Widest `[min, max]` range tracked with a presence bitmap (2 MiB).
const MAX_BITMAP_SPAN: u64 = 1 << 24;
/// Cap on materialized missing sequences, per gap and for the lost list.
pub const MAX_LISTED_MISSING: usize = 1 << 20;

fn find_discontinuities(sorted: &[u64]) -> Vec<Discontinuity> {
    let mut out = Vec::new();
    for w in sorted.windows(2) {
        if w[1] - w[0] > 1 {
            out.push(Discontinuity {
                gap_start: w[0],
                gap_end: w[1],
                lost: w[1] - w[0] - 1,
                missing: (w[0] + 1..w[1]).take(MAX_LISTED_MISSING).collect(),
            });
        }
    }
    out
}

/// Loss rate, lost sequence numbers and gap report for the observed sequences.
///
/// Duplicates are harmless: the expected range is `[min, max]` and presence is
/// tracked per value, so a repeated number neither adds nor removes loss.
pub fn analyze_packet_loss(sequences: &[u64]) -> LossReport {
    if sequences.is_empty() {
        return LossReport::default();
    }

    let mut sorted = sequences.to_vec();
    sorted.sort_unstable();
    let discontinuities = find_discontinuities(&sorted);

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    // max - min + 1 overflows u64 for the full range.
    let expected = (max - min) as u128 + 1;

    let (lost_count, lost_sequences) = match (max - min).checked_add(1) {
        Some(span) if span <= MAX_BITMAP_SPAN => {
            let mut seen = Bitmap::with_capacity(span as usize);
            for &seq in &sorted {
                seen.insert((seq - min) as usize);
            }
            let lost: Vec<u64> = seen
                .iter_unset()
                .take(MAX_LISTED_MISSING)
                .map(|offset| min + offset as u64)
                .collect();
            (span - seen.count() as u64, lost)
        }
        _ => {
            warn!(
                "sequence range {}..={} too wide to track per value, listing first {} lost",
                min, max, MAX_LISTED_MISSING
            );
            sorted.dedup();
            let lost: Vec<u64> = discontinuities
                .iter()
                .flat_map(|d| d.gap_start + 1..d.gap_end)
                .take(MAX_LISTED_MISSING)
                .collect();
            ((expected - sorted.len() as u128) as u64, lost)
        }
    };

    LossReport {
        loss_rate: lost_count as f64 / expected as f64,
        lost_count,
        lost_sequences,
        discontinuities,
    }
}
