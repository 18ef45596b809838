use crate::distance::Metric;
use crate::error::{ClusterError, Result};

/// Configuration for the k-means algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Distance metric used for assignment and error computation
    pub metric: Metric,

    /// Convergence tolerance. Fitting stops once the mean squared error
    /// changes by no more than this amount between two iterations.
    pub tol: f64,

    /// Maximum number of iterations
    pub max_iters: usize,

    /// Random seed for centroid initialization
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            metric: Metric::Euclidean,
            tol: 1e-6,
            max_iters: 100,
            seed: 0,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the distance metric
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidParameter`] if `k` is 0, `tol` is
    /// negative or not finite, or `max_iters` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ClusterError::InvalidParameter(
                "k must be greater than 0".to_string(),
            ));
        }

        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(ClusterError::InvalidParameter(format!(
                "tol must be a non-negative finite number, got {}",
                self.tol
            )));
        }

        if self.max_iters == 0 {
            return Err(ClusterError::InvalidParameter(
                "max_iters must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
