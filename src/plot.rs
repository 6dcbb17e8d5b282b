use anyhow::{anyhow, Result};
use log::info;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: u32,
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![HistogramBin {
            lo: min - 0.5,
            hi: min + 0.5,
            count: values.len() as u32,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: min + width * i as f64,
            hi: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

pub fn plot_latency_histogram(latencies: &[f64], bins: usize, path: &Path) -> Result<()> {
    let bins = histogram_bins(latencies, bins);
    if bins.is_empty() {
        return Ok(());
    }
    draw_histogram(&bins, path)
        .map_err(|e| anyhow!("failed to render latency histogram {}: {}", path.display(), e))?;
    info!("latency histogram saved to {}", path.display());
    Ok(())
}

fn draw_histogram(bins: &[HistogramBin], path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_lo = bins[0].lo;
    let x_hi = bins[bins.len() - 1].hi;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Latency Distribution Histogram", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0u32..max_count + 1)?;

    chart
        .configure_mesh()
        .x_desc("Latency (ms)")
        .y_desc("Frequency")
        .light_line_style(WHITE.mix(0.3))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lo, 0), (b.hi, b.count)], BLUE.mix(0.7).filled())
    }))?;

    root.present()?;
    Ok(())
}

/// Line chart of the per-second mapping. Only seconds present in the map are
/// plotted; absent seconds had no traffic.
pub fn plot_throughput(per_second: &BTreeMap<i64, f64>, path: &Path) -> Result<()> {
    let Some((&start, _)) = per_second.iter().next() else {
        return Ok(());
    };
    let points: Vec<(f64, f64)> = per_second
        .iter()
        .map(|(&s, &mbps)| ((s - start) as f64, mbps))
        .collect();
    draw_throughput(&points, path)
        .map_err(|e| anyhow!("failed to render throughput graph {}: {}", path.display(), e))?;
    info!("throughput graph saved to {}", path.display());
    Ok(())
}

fn draw_throughput(points: &[(f64, f64)], path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = points.iter().map(|p| p.0).fold(0.0, f64::max).max(1.0);
    let max_y = points.iter().map(|p| p.1).fold(0.0, f64::max);
    let max_y = match max_y > 0.0 {
        true => max_y * 1.1,
        false => 1.0,
    };

    let mut chart = ChartBuilder::on(&root)
        .caption("Network Throughput Over Time", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_x, 0f64..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Time (seconds from start)")
        .y_desc("Throughput (Mbps)")
        .light_line_style(WHITE.mix(0.3))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))?;

    root.present()?;
    Ok(())
}
