//! Triangle with resolved corner positions.

use nalgebra::{Point3, Vector3, Vector4};

use crate::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete corner positions.
///
/// Winding is counter-clockwise when viewed from the side the normal
/// points to.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-12);
/// let plane = tri.plane();
/// assert!((plane.z - 1.0).abs() < 1e-12);
/// assert!(plane.w.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three corners.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Corners as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// `(v1 - v0) x (v2 - v0)`. Its length is twice the area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal, or `None` when the cross product vanishes.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len = n.norm();
        if len > 0.0 {
            Some(n / len)
        } else {
            None
        }
    }

    /// Area, half the cross product length.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.normal_unnormalized().norm()
    }

    /// Arithmetic mean of the corners.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Supporting plane `(a, b, c, d)` with unit `(a, b, c)` and
    /// `a*x + b*y + c*z + d = 0` for every corner.
    ///
    /// A degenerate triangle yields all zeros.
    #[must_use]
    pub fn plane(&self) -> Vector4<f64> {
        match self.normal() {
            Some(n) => Vector4::new(n.x, n.y, n.z, -n.dot(&self.v0.coords)),
            None => Vector4::zeros(),
        }
    }

    /// Point at barycentric weights `(w0, w1, w2)`.
    ///
    /// Weights are not checked to sum to one.
    #[must_use]
    pub fn interpolate(&self, w0: f64, w1: f64, w2: f64) -> Point3<f64> {
        Point3::from(self.v0.coords * w0 + self.v1.coords * w1 + self.v2.coords * w2)
    }

    /// Directed edges `v0 -> v1`, `v1 -> v2`, `v2 -> v0`.
    #[must_use]
    pub fn edge_vectors(&self) -> [Vector3<f64>; 3] {
        [self.v1 - self.v0, self.v2 - self.v1, self.v0 - self.v2]
    }

    /// Bounding box of the three corners.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices().iter())
    }

    /// Same triangle with the winding reversed.
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }
}
