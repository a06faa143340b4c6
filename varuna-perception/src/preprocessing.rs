//! Point-cloud preprocessing for the sonar pipeline.
//!
//! Provides statistical outlier removal over [`PointCloud`] data. The
//! neighbor search is delegated to a k-d tree; the filter itself only
//! computes per-point mean neighbor distances and a global threshold.
//!
//! # Example
//!
//! ```rust
//! use varuna_perception::core::PointCloud;
//! use varuna_perception::preprocessing::{remove_outliers, PreprocessingConfig};
//!
//! let mut cloud = PointCloud::new();
//! cloud.push(0.0, 0.0, 0.0, 1.0);
//! cloud.push(0.1, 0.0, 0.0, 1.0);
//! cloud.push(0.0, 0.1, 0.0, 1.0);
//! cloud.push(50.0, 50.0, 50.0, 1.0); // Outlier
//!
//! let config = PreprocessingConfig::new().with_mean_k(3).with_std_dev_mul(1.0);
//! let clean = remove_outliers(&cloud, &config);
//! assert!(clean.len() < cloud.len());
//! ```

use kiddo::{KdTree, SquaredEuclidean};
use log::debug;

use crate::core::PointCloud;

/// Configuration for statistical outlier removal.
#[derive(Clone, Debug)]
pub struct PreprocessingConfig {
    /// Number of nearest neighbors used for the per-point mean
    /// distance. Default: 75.
    pub mean_k: usize,

    /// Standard-deviation multiplier for the rejection threshold:
    /// points whose mean neighbor distance exceeds
    /// `global_mean + std_dev_mul * global_stddev` are removed.
    /// Default: 0.75.
    pub std_dev_mul: f32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            mean_k: 75,
            std_dev_mul: 0.75,
        }
    }
}

impl PreprocessingConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the neighbor count.
    pub fn with_mean_k(mut self, mean_k: usize) -> Self {
        self.mean_k = mean_k;
        self
    }

    /// Builder-style setter for the standard-deviation multiplier.
    pub fn with_std_dev_mul(mut self, std_dev_mul: f32) -> Self {
        self.std_dev_mul = std_dev_mul;
        self
    }
}

/// Remove statistical outliers from a point cloud.
///
/// For every point, the mean distance to its `mean_k` nearest
/// neighbors is computed; points whose mean distance lies more than
/// `std_dev_mul` standard deviations above the global mean are dropped.
///
/// Contract: empty input returns an empty cloud; a single-point cloud
/// and `mean_k == 0` (no neighbors to compare against) return the input
/// unchanged. Points with non-finite coordinates are always removed.
pub fn remove_outliers(cloud: &PointCloud, config: &PreprocessingConfig) -> PointCloud {
    if cloud.is_empty() {
        return PointCloud::new();
    }
    if cloud.len() == 1 || config.mean_k == 0 {
        return cloud.clone();
    }

    let k = config.mean_k.min(cloud.len() - 1);

    // Index finite points only; NaN/inf coordinates never enter the tree.
    let mut tree: KdTree<f32, 3> = KdTree::new();
    for i in 0..cloud.len() {
        let p = cloud.point(i);
        if p.iter().all(|c| c.is_finite()) {
            tree.add(&p, i as u64);
        }
    }

    // Per-point mean distance to the k nearest neighbors. The query
    // point is itself in the tree (distance 0), so request k + 1 and
    // skip the leading self-match.
    let mean_dists: Vec<f32> = (0..cloud.len())
        .map(|i| {
            let q = cloud.point(i);
            if !q.iter().all(|c| c.is_finite()) {
                return f32::INFINITY;
            }
            let neighbors = tree.nearest_n::<SquaredEuclidean>(&q, k + 1);
            let dists: Vec<f32> = neighbors
                .iter()
                .skip(1)
                .map(|n| n.distance.sqrt())
                .collect();
            if dists.is_empty() {
                return f32::INFINITY;
            }
            dists.iter().sum::<f32>() / dists.len() as f32
        })
        .collect();

    let finite: Vec<f32> = mean_dists.iter().copied().filter(|d| d.is_finite()).collect();
    if finite.is_empty() {
        return PointCloud::new();
    }

    let n = finite.len() as f32;
    let global_mean = finite.iter().sum::<f32>() / n;
    let variance = finite
        .iter()
        .map(|d| (d - global_mean).powi(2))
        .sum::<f32>()
        / n;
    let threshold = global_mean + config.std_dev_mul * variance.sqrt();

    let keep: Vec<usize> = (0..cloud.len())
        .filter(|&i| mean_dists[i] <= threshold)
        .collect();

    debug!(
        "statistical filter kept {} of {} points (threshold {:.3})",
        keep.len(),
        cloud.len(),
        threshold
    );

    cloud.select(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_with_outlier() -> PointCloud {
        let mut cloud = PointCloud::new();
        // Dense 3x3x3 lattice near the origin
        for ix in 0..3 {
            for iy in 0..3 {
                for iz in 0..3 {
                    cloud.push(ix as f32 * 0.1, iy as f32 * 0.1, iz as f32 * 0.1, 1.0);
                }
            }
        }
        // One far-away return
        cloud.push(100.0, 100.0, 100.0, 1.0);
        cloud
    }

    #[test]
    fn test_empty_cloud_contract() {
        let result = remove_outliers(&PointCloud::new(), &PreprocessingConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_point_is_kept() {
        let mut cloud = PointCloud::new();
        cloud.push(1.0, 2.0, 3.0, 0.5);

        let result = remove_outliers(&cloud, &PreprocessingConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result.point(0), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mean_k_zero_keeps_everything() {
        let cloud = cluster_with_outlier();
        let config = PreprocessingConfig::new().with_mean_k(0);

        let result = remove_outliers(&cloud, &config);
        assert_eq!(result.len(), cloud.len());
    }

    #[test]
    fn test_removes_far_outlier() {
        let cloud = cluster_with_outlier();
        let config = PreprocessingConfig::new().with_mean_k(8).with_std_dev_mul(1.0);

        let result = remove_outliers(&cloud, &config);

        assert_eq!(result.len(), cloud.len() - 1);
        for i in 0..result.len() {
            assert!(result.xs[i] < 1.0, "outlier survived at x={}", result.xs[i]);
        }
    }

    #[test]
    fn test_keeps_uniform_lattice() {
        let mut cloud = PointCloud::new();
        for ix in 0..4 {
            for iy in 0..4 {
                cloud.push(ix as f32, iy as f32, 0.0, 1.0);
            }
        }

        // Generous threshold on a symmetric lattice keeps everything
        let config = PreprocessingConfig::new().with_mean_k(4).with_std_dev_mul(3.0);
        let result = remove_outliers(&cloud, &config);
        assert_eq!(result.len(), cloud.len());
    }

    #[test]
    fn test_non_finite_points_are_dropped() {
        let mut cloud = cluster_with_outlier();
        cloud.push(f32::NAN, 0.0, 0.0, 1.0);

        let config = PreprocessingConfig::new().with_mean_k(8).with_std_dev_mul(1.0);
        let result = remove_outliers(&cloud, &config);

        assert!(result.xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_mean_k_clamped_to_cloud_size() {
        let mut cloud = PointCloud::new();
        cloud.push(0.0, 0.0, 0.0, 1.0);
        cloud.push(0.1, 0.0, 0.0, 1.0);
        cloud.push(0.2, 0.0, 0.0, 1.0);

        // Default mean_k (75) far exceeds the cloud size
        let result = remove_outliers(&cloud, &PreprocessingConfig::default());
        assert_eq!(result.len(), 3);
    }
}
