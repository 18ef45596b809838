//! # kmeans-silhouette
//!
//! K-means clustering and silhouette scoring for in-memory matrices,
//! compatible with ndarray.
//!
//! ## Features
//!
//! - **Lloyd's algorithm** with random initialization from distinct
//!   observations and a mean-squared-error convergence test
//! - **Reproducible fitting**: seed the model through [`KMeansConfig`] or
//!   inject any [`rand::Rng`] with [`KMeans::fit_with_rng`]
//! - **Silhouette scores** per observation, for evaluating any labelling
//! - **Distance metrics**: Euclidean, Manhattan and cosine
//! - **Parallel computation**: assignment and scoring use rayon, with results
//!   independent of thread scheduling
//!
//! ## Example
//!
//! ```rust
//! use kmeans_silhouette::{KMeans, KMeansConfig, Metric, Silhouette};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((300, 4), Uniform::new(-1.0, 1.0));
//!
//! let config = KMeansConfig::new(3)
//!     .with_metric(Metric::Euclidean)
//!     .with_tol(1e-6)
//!     .with_max_iters(100)
//!     .with_seed(42);
//!
//! let mut kmeans = KMeans::with_config(config).unwrap();
//! kmeans.fit(&data.view()).unwrap();
//!
//! let labels = kmeans.predict(&data.view()).unwrap();
//! assert_eq!(labels.len(), 300);
//! assert_eq!(kmeans.centroids().unwrap().nrows(), 3);
//!
//! let scores = Silhouette::new(Metric::Euclidean)
//!     .score(&data.view(), &labels.view())
//!     .unwrap();
//! assert!(scores.iter().all(|s| (-1.0..=1.0).contains(s)));
//! ```
//!
//! ## Logging
//!
//! Progress is reported through the [`log`] facade: fit start and
//! convergence at `info`, per-iteration error at `debug`. Install any
//! logger (for example `env_logger`) to see it.

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod silhouette;

pub use config::KMeansConfig;
pub use distance::{distance, nearest_centroid, Metric};
pub use error::{ClusterError, Result};
pub use kmeans::KMeans;
pub use silhouette::Silhouette;
