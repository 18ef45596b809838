use crate::algorithm::{assign_labels, lloyd, KMeansResult};
use crate::config::KMeansConfig;
use crate::distance::Metric;
use crate::error::{ClusterError, Result};
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// K-means clustering over ndarray matrices.
///
/// A model starts unfitted. A successful [`fit`](KMeans::fit) stores the
/// centroids, the training assignment and the final mean squared error;
/// a later fit replaces all of it, and a failed fit leaves the previous
/// state untouched.
///
/// # Example
///
/// ```
/// use kmeans_silhouette::KMeans;
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.1, 0.2], [9.0, 9.0], [9.2, 8.9]];
///
/// let mut kmeans = KMeans::new(2).unwrap();
/// kmeans.fit(&data.view()).unwrap();
///
/// let labels = kmeans.predict(&data.view()).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Fit state (None if not yet fitted)
    state: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidParameter`] if `k` is 0.
    pub fn new(k: usize) -> Result<Self> {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new KMeans instance with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InvalidParameter`] if the configuration is
    /// out of range (see [`KMeansConfig::validate`]).
    pub fn with_config(config: KMeansConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            state: None,
        })
    }

    /// Fit the model to the data, seeding the random source from
    /// `config.seed`.
    ///
    /// # Arguments
    ///
    /// * `data` - Training data of shape (n_samples, n_features)
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::InsufficientData`] if there are fewer samples
    /// than clusters.
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.fit_with_rng(data, &mut rng)
    }

    /// Fit the model to the data using the given random source for
    /// centroid initialization.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        data: &ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<&mut Self> {
        let result = lloyd(data, &self.config, rng)?;

        self.state = Some(result);
        Ok(self)
    }

    /// Predict cluster assignments for new data.
    ///
    /// Each row goes to its nearest centroid; ties go to the lowest
    /// centroid index.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - The number of columns differs from the centroids' dimensionality
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>> {
        let centroids = self.centroids()?;

        let n_features = data.ncols();
        if n_features != centroids.ncols() {
            return Err(ClusterError::DimensionMismatch(format!(
                "Expected {} features, got {}",
                centroids.ncols(),
                n_features
            )));
        }

        let (labels, _) = assign_labels(data, &centroids.view(), self.config.metric);
        Ok(labels)
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>> {
        self.fit(data)?;
        self.predict(data)
    }

    /// Mean squared error of the last fit
    pub fn mse(&self) -> Result<f64> {
        Ok(self.fitted()?.mse)
    }

    /// Centroids of the fitted model, shape (k, n_features)
    pub fn centroids(&self) -> Result<&Array2<f64>> {
        Ok(&self.fitted()?.centroids)
    }

    /// Assignment of the training data from the final iteration
    pub fn labels(&self) -> Result<&Array1<usize>> {
        Ok(&self.fitted()?.labels)
    }

    /// Number of iterations run by the last fit
    pub fn n_iterations(&self) -> Result<usize> {
        Ok(self.fitted()?.n_iterations)
    }

    /// Whether the last fit stopped on the tolerance rather than `max_iters`
    pub fn converged(&self) -> Result<bool> {
        Ok(self.fitted()?.converged)
    }

    /// Mean squared error after each iteration of the last fit
    pub fn mse_history(&self) -> Result<&[f64]> {
        Ok(&self.fitted()?.mse_history)
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    fn fitted(&self) -> Result<&KMeansResult> {
        self.state.as_ref().ok_or(ClusterError::NotFitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_kmeans_new() {
        let kmeans = KMeans::new(10).unwrap();
        assert_eq!(kmeans.k(), 10);
        assert_eq!(kmeans.metric(), Metric::Euclidean);
        assert!(!kmeans.is_fitted());
    }

    #[test]
    fn test_kmeans_k_zero() {
        let result = KMeans::new(0);
        assert!(matches!(result, Err(ClusterError::InvalidParameter(_))));
    }

    #[test]
    fn test_kmeans_fit() {
        let data = Array2::random((500, 32), Uniform::new(-1.0, 1.0));
        let mut kmeans = KMeans::new(5).unwrap();

        kmeans.fit(&data.view()).unwrap();

        assert!(kmeans.is_fitted());
        let centroids = kmeans.centroids().unwrap();
        assert_eq!(centroids.nrows(), 5);
        assert_eq!(centroids.ncols(), 32);
        assert_eq!(kmeans.labels().unwrap().len(), 500);
        assert!(kmeans.mse().unwrap() >= 0.0);
    }

    #[test]
    fn test_kmeans_predict() {
        let train_data = Array2::random((500, 16), Uniform::new(-1.0, 1.0));
        let test_data = Array2::random((100, 16), Uniform::new(-1.0, 1.0));

        let mut kmeans = KMeans::new(8).unwrap();
        kmeans.fit(&train_data.view()).unwrap();

        let labels = kmeans.predict(&test_data.view()).unwrap();
        assert_eq!(labels.len(), 100);
        assert!(labels.iter().all(|&label| label < 8));
    }

    #[test]
    fn test_kmeans_fit_predict() {
        let data = Array2::random((300, 8), Uniform::new(-1.0, 1.0));
        let mut kmeans = KMeans::new(4).unwrap();

        let labels = kmeans.fit_predict(&data.view()).unwrap();
        assert_eq!(labels.len(), 300);
        assert!(kmeans.is_fitted());
    }

    #[test]
    fn test_kmeans_getters_before_fit() {
        let data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let kmeans = KMeans::new(5).unwrap();

        assert!(matches!(kmeans.predict(&data.view()), Err(ClusterError::NotFitted)));
        assert!(matches!(kmeans.mse(), Err(ClusterError::NotFitted)));
        assert!(matches!(kmeans.centroids(), Err(ClusterError::NotFitted)));
        assert!(matches!(kmeans.labels(), Err(ClusterError::NotFitted)));
    }

    #[test]
    fn test_kmeans_dimension_mismatch() {
        let train_data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let test_data = Array2::random((50, 16), Uniform::new(-1.0, 1.0));

        let mut kmeans = KMeans::new(5).unwrap();
        kmeans.fit(&train_data.view()).unwrap();

        let result = kmeans.predict(&test_data.view());
        assert!(matches!(result, Err(ClusterError::DimensionMismatch(_))));
    }

    #[test]
    fn test_failed_fit_keeps_previous_state() {
        let data = Array2::random((20, 3), Uniform::new(-1.0, 1.0));
        let mut kmeans = KMeans::new(4).unwrap();
        kmeans.fit(&data.view()).unwrap();

        let centroids_before = kmeans.centroids().unwrap().clone();
        let mse_before = kmeans.mse().unwrap();

        let too_small = Array2::random((3, 3), Uniform::new(-1.0, 1.0));
        let result = kmeans.fit(&too_small.view());

        assert!(matches!(result, Err(ClusterError::InsufficientData(_))));
        assert_eq!(kmeans.centroids().unwrap(), &centroids_before);
        assert_eq!(kmeans.mse().unwrap(), mse_before);
    }

    #[test]
    fn test_refit_replaces_state() {
        let narrow = Array2::random((50, 2), Uniform::new(-1.0, 1.0));
        let wide = Array2::random((50, 6), Uniform::new(-1.0, 1.0));

        let mut kmeans = KMeans::new(3).unwrap();
        kmeans.fit(&narrow.view()).unwrap();
        kmeans.fit(&wide.view()).unwrap();

        assert_eq!(kmeans.centroids().unwrap().ncols(), 6);
        assert!(kmeans.predict(&wide.view()).is_ok());
        assert!(matches!(
            kmeans.predict(&narrow.view()),
            Err(ClusterError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_single_cluster_centroid_is_mean() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 9.0]];
        let mut kmeans = KMeans::new(1).unwrap();
        kmeans.fit(&data.view()).unwrap();

        let centroids = kmeans.centroids().unwrap();
        assert_relative_eq!(centroids[[0, 0]], 3.0);
        assert_relative_eq!(centroids[[0, 1]], 5.0);
    }

    #[test]
    fn test_fit_with_rng_matches_seeded_fit() {
        let data = Array2::random((200, 4), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(4).with_seed(17);

        let mut seeded = KMeans::with_config(config.clone()).unwrap();
        seeded.fit(&data.view()).unwrap();

        let mut injected = KMeans::with_config(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        injected.fit_with_rng(&data.view(), &mut rng).unwrap();

        assert_eq!(seeded.centroids().unwrap(), injected.centroids().unwrap());
        assert_eq!(seeded.labels().unwrap(), injected.labels().unwrap());
    }
}
