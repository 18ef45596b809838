use crate::config::KMeansConfig;
use crate::distance::{nearest_centroid, Metric};
use crate::error::{ClusterError, Result};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub centroids: Array2<f64>,
    /// Assignment from the last iteration's assignment step
    pub labels: Array1<usize>,
    /// Mean squared error of the last iteration
    pub mse: f64,
    pub n_iterations: usize,
    /// Mean squared error after every iteration, in order
    pub mse_history: Vec<f64>,
    pub converged: bool,
}

/// Run Lloyd's k-means iteration.
///
/// Each iteration assigns every observation to its nearest centroid, moves
/// each centroid to the mean of its observations and measures the mean
/// squared distance between observations and their (updated) centroids.
/// The loop stops once that error changes by no more than `config.tol`,
/// or after `config.max_iters` iterations.
pub fn lloyd<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult> {
    config.validate()?;

    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = config.k;

    if n_samples < k {
        return Err(ClusterError::InsufficientData(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    info!(
        "Training k-means: {} samples, {} features, {} clusters, metric = {}",
        n_samples, n_features, k, config.metric
    );

    let mut centroids = initialize_centroids(data, k, rng);
    let mut labels = Array1::zeros(n_samples);
    let mut mse = 0.0;
    let mut mse_history = Vec::with_capacity(config.max_iters);
    let mut converged = false;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();

        let (new_labels, _) = assign_labels(data, &centroids.view(), config.metric);
        labels = new_labels;

        let empty_clusters = update_centroids(data, &labels.view(), &mut centroids);
        if empty_clusters > 0 {
            warn!(
                "  Iteration {}: {} empty clusters kept their previous centroids",
                iteration + 1,
                empty_clusters
            );
        }

        mse = mean_squared_error(data, &labels.view(), &centroids.view(), config.metric);
        let delta = mse_history.last().map(|prev: &f64| (mse - prev).abs());
        mse_history.push(mse);

        debug!(
            "  Iteration {}/{}: mse = {:.6}, time = {:.4}s",
            iteration + 1,
            config.max_iters,
            mse,
            iter_start.elapsed().as_secs_f64()
        );

        if let Some(delta) = delta {
            if delta <= config.tol {
                info!(
                    "Converged after {} iterations (mse change {:.3e} <= tol {:.3e})",
                    iteration + 1,
                    delta,
                    config.tol
                );
                converged = true;
                break;
            }
        }
    }

    if !converged {
        info!(
            "Stopped after max_iters = {} without converging (mse = {:.6})",
            config.max_iters, mse
        );
    }

    Ok(KMeansResult {
        centroids,
        labels,
        mse,
        n_iterations: mse_history.len(),
        mse_history,
        converged,
    })
}

/// Initialize centroids by selecting k distinct data points uniformly at random
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    let mut centroids = Array2::zeros((selected.len(), n_features));
    for (centroid_idx, &data_idx) in selected.iter().enumerate() {
        centroids.row_mut(centroid_idx).assign(&data.row(data_idx));
    }

    centroids
}

/// Assign every observation to its nearest centroid.
///
/// Returns the labels and the distance from each observation to its
/// assigned centroid, both in row order.
pub fn assign_labels(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    metric: Metric,
) -> (Array1<usize>, Array1<f64>) {
    let (labels, distances): (Vec<usize>, Vec<f64>) = (0..data.nrows())
        .into_par_iter()
        .map(|i| nearest_centroid(&data.row(i), centroids, metric))
        .unzip();

    (Array1::from(labels), Array1::from(distances))
}

/// Move every centroid to the coordinate-wise mean of its observations.
///
/// A centroid without observations is left where it is. Returns the number
/// of such empty clusters.
pub fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
    centroids: &mut Array2<f64>,
) -> usize {
    let k = centroids.nrows();
    let mut cluster_sums: Array2<f64> = Array2::zeros((k, data.ncols()));
    let mut cluster_counts = vec![0usize; k];

    for (row, &label) in data.outer_iter().zip(labels.iter()) {
        cluster_counts[label] += 1;
        let mut sum = cluster_sums.row_mut(label);
        sum += &row;
    }

    let mut empty_clusters = 0;
    for (cluster_idx, &count) in cluster_counts.iter().enumerate() {
        if count > 0 {
            let mean = &cluster_sums.row(cluster_idx) / count as f64;
            centroids.row_mut(cluster_idx).assign(&mean);
        } else {
            empty_clusters += 1;
        }
    }

    empty_clusters
}

/// Mean over all observations of the squared distance to the assigned centroid.
///
/// Distances are computed in parallel but summed in row order, so the value
/// is identical between runs.
pub fn mean_squared_error(
    data: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
    centroids: &ArrayView2<f64>,
    metric: Metric,
) -> f64 {
    let n_samples = data.nrows();
    if n_samples == 0 {
        return 0.0;
    }

    let squared: Vec<f64> = (0..n_samples)
        .into_par_iter()
        .map(|i| {
            let dist = metric.distance(&data.row(i), &centroids.row(labels[i]));
            dist * dist
        })
        .collect();

    squared.iter().sum::<f64>() / n_samples as f64
}
