use thiserror::Error;

/// Error types for k-means fitting and silhouette scoring
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// A constructor argument is out of range (k, tol, max_iters)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Not enough observations for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Feature or label count does not match what the call expects
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Distance metric name is not one of the supported metrics
    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),

    /// Silhouette is undefined when all observations share one label
    #[error("Silhouette requires at least 2 clusters: {0}")]
    SingleCluster(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
