//! Point cloud with optional per-point normals and colors.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, MeshBounds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of points with parallel attribute arrays.
///
/// Like [`crate::TriangleMesh`], an attribute is present exactly when its
/// length matches `points`.
///
/// # Example
///
/// ```
/// use mesh_types::{PointCloud, Point3, Vector3};
///
/// let mut cloud = PointCloud::from_points(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
/// ]);
/// assert_eq!(cloud.len(), 2);
/// assert!(!cloud.has_normals());
///
/// cloud.normals = vec![Vector3::z(); 2];
/// assert!(cloud.has_normals());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    /// Point positions.
    pub points: Vec<Point3<f64>>,
    /// Per-point normals, parallel to `points` when present.
    pub normals: Vec<Vector3<f64>>,
    /// Per-point RGB colors in `[0, 1]`, parallel to `points` when present.
    pub colors: Vec<Vector3<f64>>,
}

impl PointCloud {
    /// Create an empty cloud.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cloud from positions only.
    #[must_use]
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Reserve room for `n` points and, when requested, their attributes.
    #[must_use]
    pub fn with_capacity(n: usize, normals: bool, colors: bool) -> Self {
        Self {
            points: Vec::with_capacity(n),
            normals: Vec::with_capacity(if normals { n } else { 0 }),
            colors: Vec::with_capacity(if colors { n } else { 0 }),
        }
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Normals present for every point.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.points.is_empty() && self.normals.len() == self.points.len()
    }

    /// Colors present for every point.
    #[inline]
    #[must_use]
    pub fn has_colors(&self) -> bool {
        !self.points.is_empty() && self.colors.len() == self.points.len()
    }

    /// Keep only the points whose index satisfies `keep`, preserving order.
    ///
    /// Attributes that are present are filtered alongside; absent ones stay
    /// empty.
    pub fn retain_indices(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let has_normals = self.has_normals();
        let has_colors = self.has_colors();
        let mask: Vec<bool> = (0..self.points.len()).map(&mut keep).collect();
        retain_by_mask(&mut self.points, &mask);
        if has_normals {
            retain_by_mask(&mut self.normals, &mask);
        }
        if has_colors {
            retain_by_mask(&mut self.colors, &mask);
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, mask: &[bool]) {
    let mut i = 0;
    values.retain(|_| {
        let keep = mask[i];
        i += 1;
        keep
    });
}

impl MeshBounds for PointCloud {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> PointCloud {
        PointCloud::from_points((0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect())
    }

    #[test]
    fn attribute_presence() {
        let mut cloud = line(3);
        assert!(!cloud.has_colors());
        cloud.colors = vec![Vector3::new(1.0, 0.0, 0.0); 3];
        assert!(cloud.has_colors());
        assert!(!PointCloud::new().has_colors());
    }

    #[test]
    fn retain_keeps_order_and_attributes() {
        let mut cloud = line(5);
        cloud.normals = (0..5).map(|i| Vector3::new(0.0, i as f64, 0.0)).collect();
        cloud.retain_indices(|i| i % 2 == 0);
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.points[1], Point3::new(2.0, 0.0, 0.0));
        assert_eq!(cloud.normals[2], Vector3::new(0.0, 4.0, 0.0));
        assert!(cloud.colors.is_empty());
    }

    #[test]
    fn bounds_cover_points() {
        let cloud = line(4);
        let b = cloud.bounds();
        assert_eq!(b.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Point3::new(3.0, 0.0, 0.0));
        assert!(PointCloud::new().bounds().is_empty());
    }
}
