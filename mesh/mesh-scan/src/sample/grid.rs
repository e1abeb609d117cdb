//! Uniform-grid radius queries over a fixed point set.

use hashbrown::HashMap;
use mesh_types::Point3;

/// Fixed-radius neighbor search over a point set that does not change.
pub trait RadiusIndex {
    /// Every point within `radius` of `query` (inclusive) as
    /// `(index, squared_distance)`.
    fn search_radius(&self, query: &Point3<f64>, radius: f64) -> Vec<(usize, f64)>;

    /// Number of indexed points.
    fn len(&self) -> usize;

    /// True when nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type CellKey = (i64, i64, i64);

/// Spatial hash binning points into cubic cells.
///
/// Queries visit every cell overlapped by the query ball, so a cell size
/// near the typical query radius keeps the visited set at 27 cells.
///
/// # Example
///
/// ```
/// use mesh_types::Point3;
/// use mesh_scan::sample::{RadiusIndex, SpatialGrid};
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.5, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// ];
/// let grid = SpatialGrid::new(&points, 1.0);
///
/// let mut hits = grid.search_radius(&Point3::origin(), 1.0);
/// hits.sort_by_key(|&(i, _)| i);
/// assert_eq!(hits, vec![(0, 0.0), (1, 0.25)]);
/// ```
#[derive(Debug, Clone)]
pub struct SpatialGrid<'a> {
    points: &'a [Point3<f64>],
    inv_cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl<'a> SpatialGrid<'a> {
    /// Bin `points` into cells of edge length `cell_size`.
    ///
    /// A non-positive or non-finite cell size falls back to 1.
    #[must_use]
    pub fn new(points: &'a [Point3<f64>], cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let mut grid = Self {
            points,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        };
        for (i, p) in points.iter().enumerate() {
            let key = grid.cell_key(p);
            grid.cells.entry(key).or_default().push(i);
        }
        grid
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_coord(&self, x: f64) -> i64 {
        (x * self.inv_cell_size).floor() as i64
    }

    fn cell_key(&self, p: &Point3<f64>) -> CellKey {
        (self.cell_coord(p.x), self.cell_coord(p.y), self.cell_coord(p.z))
    }
}

impl RadiusIndex for SpatialGrid<'_> {
    fn search_radius(&self, query: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        let mut found = Vec::new();
        if radius.is_nan() || radius < 0.0 || self.points.is_empty() {
            return found;
        }
        let r2 = radius * radius;
        let lo = self.cell_key(&Point3::new(query.x - radius, query.y - radius, query.z - radius));
        let hi = self.cell_key(&Point3::new(query.x + radius, query.y + radius, query.z + radius));

        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    let Some(bucket) = self.cells.get(&(cx, cy, cz)) else {
                        continue;
                    };
                    for &i in bucket {
                        let d2 = (self.points[i] - query).norm_squared();
                        if d2 <= r2 {
                            found.push((i, d2));
                        }
                    }
                }
            }
        }
        found
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(points: &[Point3<f64>], q: &Point3<f64>, r: f64) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| (*p - q).norm_squared() <= r * r)
            .map(|(i, _)| i)
            .collect()
    }

    fn lattice() -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for i in -4..4 {
            for j in -4..4 {
                for k in -2..2 {
                    points.push(Point3::new(
                        f64::from(i) * 0.3,
                        f64::from(j) * 0.3,
                        f64::from(k) * 0.3,
                    ));
                }
            }
        }
        points
    }

    #[test]
    fn matches_brute_force() {
        let points = lattice();
        let grid = SpatialGrid::new(&points, 0.5);
        for q in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-1.1, 0.7, 0.2),
            Point3::new(0.95, -0.95, -0.6),
        ] {
            for r in [0.0, 0.3, 0.5, 1.3] {
                let mut got: Vec<usize> = grid.search_radius(&q, r).into_iter().map(|(i, _)| i).collect();
                got.sort_unstable();
                assert_eq!(got, brute_force(&points, &q, r), "query {q:?} radius {r}");
            }
        }
    }

    #[test]
    fn squared_distances_are_reported() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)];
        let grid = SpatialGrid::new(&points, 1.0);
        let hits = grid.search_radius(&Point3::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|&(_, d2)| (d2 - 1.0).abs() < 1e-12));
    }

    #[test]
    fn invalid_cell_size_falls_back() {
        let points = lattice();
        let grid = SpatialGrid::new(&points, 0.0);
        assert!(grid.cell_count() > 0);
        assert_eq!(grid.len(), points.len());
        let grid = SpatialGrid::new(&points, f64::NAN);
        assert!(!grid.search_radius(&Point3::origin(), 0.31).is_empty());
    }

    #[test]
    fn negative_radius_finds_nothing() {
        let points = lattice();
        let grid = SpatialGrid::new(&points, 0.5);
        assert!(grid.search_radius(&Point3::origin(), -1.0).is_empty());
    }
}
