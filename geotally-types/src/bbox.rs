use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box in longitude/latitude.
///
/// This is a wrapper around `geo::Rect`. An extent that has not seen any point
/// yet is modelled as `Option<BoundingBox2D>::None` rather than with sentinel
/// coordinates; see [`union_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use geotally_types::bbox::BoundingBox2D;
    ///
    /// let melbourne = BoundingBox2D::new(144.5, -38.5, 145.5, -37.5);
    /// assert_eq!(melbourne.width(), 1.0);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Create a degenerate bounding box covering a single point.
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.x(), point.y(), point.x(), point.y())
    }

    /// Smallest bounding box covering every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        points
            .into_iter()
            .fold(None, |acc, point| union_bounds(acc, Some(Self::from_point(point))))
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    /// South-west corner as a `(lat, lon)` pair, the order observation APIs expect.
    pub fn south_west(&self) -> (f64, f64) {
        (self.min_y(), self.min_x())
    }

    /// North-east corner as a `(lat, lon)` pair.
    pub fn north_east(&self) -> (f64, f64) {
        (self.max_y(), self.max_x())
    }

    /// Check if a point is contained within this bounding box (edges inclusive).
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// Coordinate-wise union: min of mins, max of maxes.
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        Self::new(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}

/// Union of two optional extents, with `None` as the identity element.
///
/// # Examples
///
/// ```
/// use geotally_types::bbox::{BoundingBox2D, union_bounds};
///
/// let a = BoundingBox2D::new(0.0, 0.0, 1.0, 1.0);
/// assert_eq!(union_bounds(None, Some(a)), Some(a));
/// assert_eq!(union_bounds(None, None), None);
/// ```
pub fn union_bounds(
    a: Option<BoundingBox2D>,
    b: Option<BoundingBox2D>,
) -> Option<BoundingBox2D> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let bbox = BoundingBox2D::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(bbox.min_x(), 0.0);
        assert_eq!(bbox.max_y(), 10.0);
    }

    #[test]
    fn test_contains_point_is_edge_inclusive() {
        let bbox = BoundingBox2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains_point(&Point::new(0.0, 0.0)));
        assert!(bbox.contains_point(&Point::new(10.0, 5.0)));
        assert!(!bbox.contains_point(&Point::new(10.000001, 5.0)));
        assert!(!bbox.contains_point(&Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox2D::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox2D::new(-2.0, 0.5, 0.5, 3.0);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox2D::new(-2.0, 0.0, 1.0, 3.0));
    }

    #[test]
    fn test_empty_extent_never_wins_a_union() {
        let real = BoundingBox2D::new(-1e9, -1e9, 1e9, 1e9);
        assert_eq!(union_bounds(None, Some(real)), Some(real));
        assert_eq!(union_bounds(Some(real), None), Some(real));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Point::new(1.0, 2.0),
            Point::new(3.0, -1.0),
            Point::new(2.5, 4.0),
        ];
        let bbox = BoundingBox2D::from_points(&points).unwrap();
        assert_eq!(bbox.min_x(), 1.0);
        assert_eq!(bbox.max_x(), 3.0);
        assert_eq!(bbox.min_y(), -1.0);
        assert_eq!(bbox.max_y(), 4.0);

        assert!(BoundingBox2D::from_points(&Vec::<Point>::new()).is_none());
    }

    #[test]
    fn test_corners_are_lat_lon() {
        let bbox = BoundingBox2D::new(144.5, -38.5, 145.5, -37.5);
        assert_eq!(bbox.south_west(), (-38.5, 144.5));
        assert_eq!(bbox.north_east(), (-37.5, 145.5));
    }
}
