//! K-means clustering of 2-D points via Lloyd's algorithm.
//!
//! Initial centroids are k distinct input points sampled without
//! replacement; the algorithm then alternates assigning each point to its
//! nearest centroid (Euclidean distance) and recomputing each centroid as
//! the mean of its assigned points, until no point changes membership or
//! the iteration cap is reached. The result is a local optimum — that is
//! intrinsic to the method, not a defect.
//!
//! The random source is injected, so callers control determinism:
//! [`cluster`] takes any [`Rng`], and [`cluster_seeded`] fixes a
//! [`SmallRng`] seed for reproducible runs and tests.
//!
//! Reference: Lloyd (1982), "Least squares quantization in PCM",
//! *IEEE Transactions on Information Theory* 28(2).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{AnalyticsError, Result};

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
///
/// # Examples
/// ```
/// use trip_analytics::cluster::{euclidean_distance, Point};
/// let d = euclidean_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
/// assert_eq!(d, 5.0);
/// ```
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Outcome of a k-means run.
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster index in `0..k` for each input point, in input order.
    pub labels: Vec<usize>,
    /// Final centroid positions, one per cluster.
    pub centroids: Vec<Point>,
    /// Iterations performed, including the converging one.
    pub iterations: usize,
}

/// Runs Lloyd's algorithm with an injected random source.
///
/// A centroid that ends an iteration with zero assigned points retains
/// its previous position rather than becoming undefined.
///
/// # Errors
/// [`AnalyticsError::InvalidClusterCount`] if `k == 0` or
/// `k > points.len()`.
///
/// # Examples
/// ```
/// use trip_analytics::cluster::{cluster_seeded, Point};
///
/// let points = vec![
///     Point::new(0.0, 0.0), Point::new(0.5, 0.5),
///     Point::new(10.0, 10.0), Point::new(10.5, 10.5),
/// ];
/// let result = cluster_seeded(&points, 2, 100, 42).unwrap();
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_eq!(result.labels[2], result.labels[3]);
/// assert_ne!(result.labels[0], result.labels[2]);
/// ```
pub fn cluster<R: Rng>(
    points: &[Point],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Result<KMeansResult> {
    if k == 0 || k > points.len() {
        return Err(AnalyticsError::InvalidClusterCount {
            requested: k,
            available: points.len(),
        });
    }

    let mut centroids: Vec<Point> = sample_distinct_indices(points.len(), k, rng)
        .into_iter()
        .map(|i| points[i])
        .collect();
    // Sentinel labels so the first assignment always registers as a change.
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;

    // At least one assignment pass always runs so every label is defined.
    for iteration in 0..max_iterations.max(1) {
        iterations = iteration + 1;

        // Assignment step.
        let mut changed = false;
        for (i, &point) in points.iter().enumerate() {
            let mut nearest = 0;
            let mut nearest_distance = f64::INFINITY;
            for (c, &centroid) in centroids.iter().enumerate() {
                let distance = euclidean_distance(point, centroid);
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = c;
                }
            }
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        if !changed {
            debug!(iterations, k, "k-means converged");
            break;
        }

        // Update step: each centroid moves to the mean of its points.
        let mut sums = vec![(0.0, 0.0); k];
        let mut counts = vec![0usize; k];
        for (&label, &point) in labels.iter().zip(points) {
            sums[label].0 += point.x;
            sums[label].1 += point.y;
            counts[label] += 1;
        }
        for c in 0..k {
            // An empty cluster keeps its previous centroid.
            if counts[c] > 0 {
                centroids[c] = Point::new(
                    sums[c].0 / counts[c] as f64,
                    sums[c].1 / counts[c] as f64,
                );
            }
        }
        trace!(iteration, "recomputed centroids");
    }

    Ok(KMeansResult {
        labels,
        centroids,
        iterations,
    })
}

/// Runs [`cluster`] with a deterministic seed.
///
/// Same seed, points, and parameters always produce the same result.
pub fn cluster_seeded(
    points: &[Point],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Result<KMeansResult> {
    let mut rng = SmallRng::seed_from_u64(seed);
    cluster(points, k, max_iterations, &mut rng)
}

/// Samples `k` distinct indices from `0..n` without replacement.
///
/// Partial Fisher–Yates: only the first `k` positions are shuffled.
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
fn sample_distinct_indices<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
