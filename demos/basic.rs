//! Basic example demonstrating kmeans-silhouette usage
//!
//! Run with: RUST_LOG=debug cargo run --example basic --release

use env_logger::Env;
use kmeans_silhouette::{KMeans, KMeansConfig, Metric, Silhouette};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", "info"));

    println!("=== kmeans-silhouette example ===\n");

    // Generate synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let mut data = Array2::<f64>::zeros((n_samples, n_features));
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));

    for i in 0..n_samples {
        let cluster_idx = i % 3;
        data[[i, 0]] = centers[cluster_idx][0] + noise[[i, 0]];
        data[[i, 1]] = centers[cluster_idx][1] + noise[[i, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let metric: Metric = "euclidean".parse()?;
    let config = KMeansConfig::new(n_clusters)
        .with_metric(metric)
        .with_tol(1e-6)
        .with_max_iters(100)
        .with_seed(42);

    println!("Running k-means with k={}...\n", n_clusters);

    let mut kmeans = KMeans::with_config(config)?;
    kmeans.fit(&data.view())?;

    println!("\nLearned centroids:");
    let centroids = kmeans.centroids()?;
    for i in 0..centroids.nrows() {
        println!(
            "  Centroid {}: ({:.4}, {:.4})",
            i,
            centroids[[i, 0]],
            centroids[[i, 1]]
        );
    }
    println!(
        "Mean squared error: {:.4} after {} iterations\n",
        kmeans.mse()?,
        kmeans.n_iterations()?
    );

    let labels = kmeans.predict(&data.view())?;

    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in labels.iter() {
        cluster_counts[label] += 1;
    }

    println!("Cluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }
    println!();

    let silhouette = Silhouette::new(metric);
    let scores = silhouette.score(&data.view(), &labels.view())?;

    println!("First 10 sample assignments:");
    for i in 0..10 {
        println!(
            "  Sample {} at ({:.2}, {:.2}) -> Cluster {} (silhouette {:.3})",
            i,
            data[[i, 0]],
            data[[i, 1]],
            labels[i],
            scores[i]
        );
    }

    println!(
        "\nMean silhouette: {:.4}",
        silhouette.mean_score(&data.view(), &labels.view())?
    );

    println!("\n=== Done! ===");
    Ok(())
}
