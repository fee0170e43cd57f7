//! K-means color quantizer over 8-bit RGB space.
//!
//! Reduces an arbitrary color population to `k` representative means by
//! iterative refinement. The caller supplies the random source, so results
//! are reproducible with a seeded generator.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rand::Rng;
use rgb::RGB8;

use crate::error::PgsError;

/// Default cap on refinement iterations.
///
/// The convergence test is an absolute error threshold, which pathological
/// inputs (few distinct colors, unlucky initialization) need not ever
/// satisfy, so the loop is bounded as well.
pub const DEFAULT_MAX_ITERATIONS: usize = 256;

/// Means move less than this (summed over all clusters, in RGB distance
/// units) between iterations → converged.
const CONVERGENCE_THRESHOLD: f64 = 1.0;

/// Result of one quantization run.
#[derive(Clone, Debug)]
pub struct Quantization {
    /// The `k` cluster means, each a valid 8-bit RGB triple.
    pub means: Vec<RGB8>,
    /// Every sampled color → the cluster it fell into on the final
    /// iteration. Duplicate samples of the same color always land in the
    /// same cluster, and the first insertion wins.
    pub assignment: BTreeMap<RGB8, usize>,
}

/// Euclidean distance between two colors in RGB space.
pub fn distance(a: RGB8, b: RGB8) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    libm::sqrt(dr * dr + dg * dg + db * db)
}

/// Quantize `colors` down to `k` representative means.
///
/// The population is taken as-is: duplicate colors weight their cluster's
/// mean by their frequency. A cluster that ends an iteration empty retains
/// its previous mean.
///
/// # Panics
///
/// Panics if `colors` is empty or `k` is zero. An empty population is a
/// caller bug, not a recoverable condition.
pub fn quantize<R: Rng>(
    colors: &[RGB8],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
    stop: &dyn Stop,
) -> Result<Quantization, PgsError> {
    assert!(!colors.is_empty(), "cannot quantize an empty color population");
    assert!(k >= 1, "cluster count must be at least 1");

    // Initial means are random distinct colors; channels start at 1 so an
    // all-zero "null" entry can't appear by accident.
    let mut means: Vec<RGB8> = Vec::with_capacity(k);
    while means.len() < k {
        let candidate = RGB8 {
            r: rng.random_range(1..=255),
            g: rng.random_range(1..=255),
            b: rng.random_range(1..=255),
        };
        if !means.contains(&candidate) {
            means.push(candidate);
        }
    }

    let mut assigned = vec![0usize; colors.len()];
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];
    let mut error = 0.0f64;

    for _ in 0..max_iterations {
        stop.check()?;

        sums.iter_mut().for_each(|s| *s = [0; 3]);
        counts.fill(0);

        // Assign each sample to the nearest mean. Only a strictly smaller
        // distance moves a sample, so ties keep the lowest cluster index.
        for (slot, &color) in assigned.iter_mut().zip(colors.iter()) {
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for (j, &mean) in means.iter().enumerate() {
                let d = distance(mean, color);
                if d < best_dist {
                    best_dist = d;
                    best = j;
                }
            }
            *slot = best;
            sums[best][0] += u64::from(color.r);
            sums[best][1] += u64::from(color.g);
            sums[best][2] += u64::from(color.b);
            counts[best] += 1;
        }

        // Move each mean to the channel-wise average of its members and sum
        // up how far the means travelled.
        let mut new_error = 0.0f64;
        for j in 0..k {
            let next = if counts[j] == 0 {
                means[j]
            } else {
                RGB8 {
                    r: (sums[j][0] / counts[j]) as u8,
                    g: (sums[j][1] / counts[j]) as u8,
                    b: (sums[j][2] / counts[j]) as u8,
                }
            };
            new_error += distance(means[j], next);
            means[j] = next;
        }

        let converged = libm::fabs(error - new_error) < CONVERGENCE_THRESHOLD;
        error = new_error;
        if converged {
            break;
        }
    }

    // Replay final-iteration membership. A color sampled more than once maps
    // to the same cluster every time, so or_insert never loses information.
    let mut assignment = BTreeMap::new();
    for (&color, &cluster) in colors.iter().zip(assigned.iter()) {
        assignment.entry(color).or_insert(cluster);
    }

    Ok(Quantization { means, assignment })
}
