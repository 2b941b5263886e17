//! Random row sampling for the data preview table.

use crate::config::ReportConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Number of rows to preview: `max(1, round(row_count * fraction))`, never
/// more than the table holds.
pub fn sample_size(row_count: usize, fraction: f64) -> usize {
    if row_count == 0 {
        return 0;
    }
    let target = (row_count as f64 * fraction).round() as usize;
    target.clamp(1, row_count)
}

/// Draw `size` distinct row indices by rejection sampling.
///
/// Indices come back in acceptance order, not row order.
pub fn sample_indices<R: Rng + ?Sized>(row_count: usize, size: usize, rng: &mut R) -> Vec<usize> {
    let target = size.min(row_count);
    let mut used = HashSet::with_capacity(target);
    let mut picked = Vec::with_capacity(target);

    while picked.len() < target {
        let idx = rng.gen_range(0..row_count);
        if used.insert(idx) {
            picked.push(idx);
        }
    }

    picked
}

/// Sampler RNG: pinned when the config carries a seed, entropy-seeded otherwise.
pub(crate) fn sampler_rng(config: &ReportConfig) -> StdRng {
    match config.sample_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
