use crate::model::LatencySummary;

/// Mean, population variance, min and max. `None` when there is no data.
pub fn analyze_latency(latencies: &[f64]) -> Option<LatencySummary> {
    if latencies.is_empty() {
        return None;
    }

    let cnt = latencies.len() as f64;
    let mean = latencies.iter().sum::<f64>() / cnt;
    let variance = latencies.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / cnt;
    let min = latencies.iter().copied().fold(f64::INFINITY, f64::min);
    let max = latencies.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(LatencySummary {
        mean,
        variance,
        min,
        max,
    })
}
