//! Point cloud storage (Structure-of-Arrays layout).

/// A 3D point cloud with per-point intensity.
///
/// Uses SoA layout: each field lives in its own contiguous array, which
/// keeps neighbor queries and statistics cache-friendly and matches the
/// buffers the sonar driver hands over.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    /// X coordinates (meters)
    pub xs: Vec<f32>,
    /// Y coordinates (meters)
    pub ys: Vec<f32>,
    /// Z coordinates (meters)
    pub zs: Vec<f32>,
    /// Return intensities
    pub intensities: Vec<f32>,
}

impl PointCloud {
    /// Create an empty point cloud.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
            intensities: Vec::with_capacity(capacity),
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Is the cloud empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Append a point.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32, intensity: f32) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
        self.intensities.push(intensity);
    }

    /// Coordinates of point `i` as an array (for k-d tree queries).
    #[inline]
    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.xs[i], self.ys[i], self.zs[i]]
    }

    /// Remove all points, keeping allocations.
    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.zs.clear();
        self.intensities.clear();
    }

    /// Build a new cloud from the points at the given indices.
    pub fn select(&self, indices: &[usize]) -> PointCloud {
        let mut out = PointCloud::with_capacity(indices.len());
        for &i in indices {
            out.push(self.xs[i], self.ys[i], self.zs[i], self.intensities[i]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_point() {
        let mut cloud = PointCloud::new();
        cloud.push(1.0, 2.0, 3.0, 0.5);
        cloud.push(4.0, 5.0, 6.0, 0.9);

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.point(1), [4.0, 5.0, 6.0]);
        assert_eq!(cloud.intensities[0], 0.5);
    }

    #[test]
    fn test_select() {
        let mut cloud = PointCloud::new();
        for i in 0..5 {
            cloud.push(i as f32, 0.0, 0.0, 1.0);
        }

        let picked = cloud.select(&[0, 2, 4]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked.xs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let mut cloud = PointCloud::new();
        cloud.push(1.0, 1.0, 1.0, 1.0);
        cloud.clear();
        assert!(cloud.is_empty());
    }
}
