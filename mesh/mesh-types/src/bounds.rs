//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis and absorbs the first point
/// passed to [`Aabb::expand_to_include`].
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::from_points(
///     [Point3::new(0.0, 2.0, -1.0), Point3::new(3.0, 0.0, 1.0)].iter(),
/// );
/// assert_eq!(aabb.min, Point3::new(0.0, 0.0, -1.0));
/// assert_eq!(aabb.max, Point3::new(3.0, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Componentwise minimum corner.
    pub min: Point3<f64>,
    /// Componentwise maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from its two corners.
    #[inline]
    #[must_use]
    pub const fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// The empty box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box enclosing all `points`. Empty if the iterator is.
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// True when no point has been added.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along each axis.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// True if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// True when the two closed boxes overlap on every axis.
    ///
    /// Touching faces count as overlap.
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let a = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
    /// let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
    /// let c = Aabb::new(Point3::new(1.5, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_absorbs_first_point() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_to_include(&Point3::new(1.0, -2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn from_points_of_nothing_is_empty() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
        assert_eq!(aabb, Aabb::default());
    }

    #[test]
    fn intersects_is_symmetric_and_closed() {
        let a = Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0));
        let c = Aabb::new(Point3::new(0.0, 0.0, 2.5), Point3::new(1.0, 1.0, 3.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn empty_never_intersects() {
        let a = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(&Aabb::empty()));
    }

    #[test]
    fn center_extent_contains() {
        let aabb = Aabb::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 2.0, 2.5));
        assert_eq!(aabb.extent(), Vector3::new(2.0, 4.0, 1.0));
        assert!(aabb.contains(&Point3::new(1.0, 4.0, 3.0)));
        assert!(!aabb.contains(&Point3::new(1.1, 0.0, 2.0)));
    }
}
