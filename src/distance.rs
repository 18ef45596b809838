use crate::error::ClusterError;
use ndarray::{ArrayView1, ArrayView2};
use std::fmt;
use std::str::FromStr;

/// Distance metric used for centroid assignment and silhouette scoring.
///
/// The set is closed: names are resolved once through [`FromStr`], so an
/// unknown metric is reported when the model is configured rather than on
/// the first distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// L2 norm of the difference
    #[default]
    Euclidean,
    /// L1 norm of the difference
    Manhattan,
    /// One minus the cosine similarity
    Cosine,
}

impl Metric {
    /// Canonical lowercase name of the metric
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        }
    }

    /// Distance between two feature vectors of equal length.
    ///
    /// Always non-negative and symmetric, and exactly `0.0` for identical
    /// inputs.
    #[inline]
    pub fn distance(&self, a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "feature vectors differ in length");

        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            Metric::Manhattan => a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum(),
            Metric::Cosine => cosine_distance(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            "cosine" => Ok(Metric::Cosine),
            _ => Err(ClusterError::UnsupportedMetric(format!(
                "'{}' (expected one of: euclidean, manhattan, cosine)",
                s
            ))),
        }
    }
}

/// Compute the distance between `a` and `b` under `metric`
#[inline]
pub fn distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>, metric: Metric) -> f64 {
    metric.distance(a, b)
}

fn cosine_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    if a == b {
        return 0.0;
    }

    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();

    // Direction of a zero vector is undefined; treat it as orthogonal
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    (1.0 - a.dot(b) / (norm_a * norm_b)).clamp(0.0, 2.0)
}

/// Find the nearest centroid to `row`.
///
/// Returns `(index, distance)`. Ties go to the lowest centroid index.
#[inline]
pub fn nearest_centroid(
    row: &ArrayView1<f64>,
    centroids: &ArrayView2<f64>,
    metric: Metric,
) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = metric.distance(row, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = j;
        }
    }

    (best_idx, best_dist)
}
