use crate::distance::Metric;
use crate::error::{ClusterError, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Per-observation silhouette scores for a labelled dataset.
///
/// For observation `i` in cluster `c`:
///
/// - `a(i)` is the mean distance from `i` to the other members of `c`
/// - `b(i)` is the smallest mean distance from `i` to the members of any
///   other cluster
/// - `s(i) = (b(i) - a(i)) / max(a(i), b(i))`
///
/// An observation that is alone in its cluster scores `0`, as does one with
/// `a(i) == b(i) == 0`. Labels need not be contiguous.
///
/// # Example
///
/// ```
/// use kmeans_silhouette::{Metric, Silhouette};
/// use ndarray::array;
///
/// let data = array![[0.0], [1.0], [4.0], [5.0]];
/// let labels = array![0usize, 0, 1, 1];
///
/// let scores = Silhouette::new(Metric::Euclidean)
///     .score(&data.view(), &labels.view())
///     .unwrap();
/// assert!(scores.iter().all(|&s| s > 0.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silhouette {
    metric: Metric,
}

impl Silhouette {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Compute the silhouette score of every observation.
    ///
    /// # Arguments
    ///
    /// * `data` - Observations of shape (n_samples, n_features)
    /// * `labels` - Cluster label of each observation, shape (n_samples,)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `labels` and `data` have a different number of rows
    /// - `labels` contains fewer than 2 distinct values
    pub fn score(&self, data: &ArrayView2<f64>, labels: &ArrayView1<usize>) -> Result<Array1<f64>> {
        let n_samples = data.nrows();
        if labels.len() != n_samples {
            return Err(ClusterError::DimensionMismatch(format!(
                "Expected {} labels, got {}",
                n_samples,
                labels.len()
            )));
        }

        let clusters = cluster_members(labels);
        if clusters.len() < 2 {
            return Err(ClusterError::SingleCluster(format!(
                "found {} distinct label(s) among {} observations",
                clusters.len(),
                n_samples
            )));
        }

        let scores: Vec<f64> = (0..n_samples)
            .into_par_iter()
            .map(|i| self.sample_score(data, i, labels[i], &clusters))
            .collect();

        Ok(Array1::from(scores))
    }

    /// Mean silhouette score over all observations.
    ///
    /// Useful for comparing clusterings of the same data with different k.
    pub fn mean_score(&self, data: &ArrayView2<f64>, labels: &ArrayView1<usize>) -> Result<f64> {
        let scores = self.score(data, labels)?;
        Ok(scores.sum() / scores.len() as f64)
    }

    fn sample_score(
        &self,
        data: &ArrayView2<f64>,
        i: usize,
        label: usize,
        clusters: &BTreeMap<usize, Vec<usize>>,
    ) -> f64 {
        let own = match clusters.get(&label) {
            Some(members) if members.len() > 1 => members,
            _ => return 0.0,
        };

        let row = data.row(i);
        let total_distance = |members: &[usize]| -> f64 {
            members
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| self.metric.distance(&row, &data.row(j)))
                .sum()
        };

        let cohesion = total_distance(own.as_slice()) / (own.len() - 1) as f64;

        let separation = clusters
            .iter()
            .filter(|(&other, _)| other != label)
            .map(|(_, members)| total_distance(members.as_slice()) / members.len() as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = cohesion.max(separation);
        if denom == 0.0 {
            0.0
        } else {
            (separation - cohesion) / denom
        }
    }
}

/// Group observation indices by label, ordered by label
fn cluster_members(labels: &ArrayView1<usize>) -> BTreeMap<usize, Vec<usize>> {
    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        clusters.entry(label).or_default().push(i);
    }
    clusters
}
