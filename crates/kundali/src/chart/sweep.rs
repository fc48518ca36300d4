//! Batch chart casting over many locations for one moment.
//!
//! Each `assemble` call is independent and CPU bound, so the work is split
//! into chunks on tokio's blocking pool and stitched back in input order.

use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::chart::{Chart, ChartAssembler, Location};
use crate::error::ChartError;
use crate::time::Moment;

/// Cast one chart per location. The outer error only reports a task that
/// panicked or was cancelled; per-location failures stay in their slot.
pub async fn assemble_sweep(
    assembler: Arc<ChartAssembler>,
    moment: Moment,
    locations: Vec<Location>,
) -> anyhow::Result<Vec<Result<Chart, ChartError>>> {
    let total = locations.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let chunk_size = total.div_ceil(workers).max(1);

    let mut tasks = JoinSet::new();
    for (chunk_index, chunk) in locations.chunks(chunk_size).enumerate() {
        let assembler = Arc::clone(&assembler);
        let chunk = chunk.to_vec();
        tasks.spawn_blocking(move || {
            let charts: Vec<_> = chunk
                .iter()
                .map(|location| assembler.assemble(&moment, location))
                .collect();
            (chunk_index, charts)
        });
    }

    let mut chunks: Vec<Option<Vec<Result<Chart, ChartError>>>> =
        (0..total.div_ceil(chunk_size)).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (chunk_index, charts) = joined.context("chart sweep task failed")?;
        chunks[chunk_index] = Some(charts);
    }

    let mut results = Vec::with_capacity(total);
    for (chunk_index, charts) in chunks.into_iter().enumerate() {
        let charts = charts.ok_or_else(|| anyhow::anyhow!("chart sweep lost chunk {chunk_index}"))?;
        results.extend(charts);
    }
    log::debug!("Swept {} locations in chunks of {}", total, chunk_size);
    Ok(results)
}

/// Largest grid [`grid`] will build.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Latitude/longitude grid, row by row from `(lat_min, lon_min)`, both ends inclusive.
pub fn grid(
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    step: f64,
) -> anyhow::Result<Vec<Location>> {
    if !(step.is_finite() && step > 0.0) {
        anyhow::bail!("grid step must be positive, got {step}");
    }
    if lat_min > lat_max || lon_min > lon_max {
        anyhow::bail!("grid bounds are inverted");
    }
    // corners are validated so every point in between is in range
    Location::new(lat_min, lon_min)?;
    Location::new(lat_max, lon_max)?;

    let steps = |min: f64, max: f64| ((max - min) / step + 1e-9).floor() + 1.0;
    let (rows, cols) = (steps(lat_min, lat_max), steps(lon_min, lon_max));
    let limit = MAX_GRID_POINTS as f64;
    if rows > limit || cols > limit {
        anyhow::bail!("grid step {step} exceeds {MAX_GRID_POINTS} points per axis");
    }
    let (rows, cols) = (rows as usize, cols as usize);
    let total = rows
        .checked_mul(cols)
        .filter(|&n| n <= MAX_GRID_POINTS)
        .ok_or_else(|| {
            anyhow::anyhow!("grid of {rows}x{cols} points exceeds {MAX_GRID_POINTS}")
        })?;

    let mut points = Vec::with_capacity(total);
    for row in 0..rows {
        for col in 0..cols {
            points.push(Location {
                latitude: (lat_min + row as f64 * step).min(lat_max),
                longitude: (lon_min + col as f64 * step).min(lon_max),
            });
        }
    }
    Ok(points)
}
