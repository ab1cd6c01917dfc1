//! Point-in-ring, point-in-polygon and point-in-region tests.
//!
//! All tests are planar over `(lon, lat)` and use the even-odd ray casting
//! rule: a ray is cast from the query point towards +longitude and every edge
//! it crosses toggles the inside flag.
//!
//! Edge handling is fixed as follows and must not drift:
//! - an edge counts only if it straddles the query latitude, i.e. exactly one
//!   endpoint has `lat > q.lat`. Horizontal edges therefore never count and the
//!   intersection division is never evaluated for them.
//! - a straddling edge counts if `q.lon` is strictly less than the longitude at
//!   which the edge meets the query latitude.
//!
//! Points exactly on an edge or vertex are not guaranteed a consistent answer.
//!
//! None of these functions fail; degenerate or empty geometry contains nothing.

use geotally_types::{Point, Polygon, Region, Ring};

/// Even-odd ray casting against one ring. Rings with fewer than 3 distinct
/// points contain nothing.
///
/// # Examples
///
/// ```
/// use geotally::compute::containment::point_in_ring;
/// use geotally_types::{Point, Ring};
///
/// let square = Ring::closed(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ]);
/// assert!(point_in_ring(&square, &Point::new(5.0, 5.0)));
/// assert!(!point_in_ring(&square, &Point::new(20.0, 20.0)));
/// ```
pub fn point_in_ring(ring: &Ring, point: &Point) -> bool {
    if ring.is_degenerate() {
        return false;
    }
    let points = ring.points();
    let n = points.len();

    let (qx, qy) = (point.x(), point.y());
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[j], points[i]);
        if (a.y() > qy) != (b.y() > qy) {
            let cross_x = (b.x() - a.x()) * (qy - a.y()) / (b.y() - a.y()) + a.x();
            if qx < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and outside every hole.
///
/// The cached bounds are checked first. They always cover the rings, so a
/// point outside them cannot be inside the polygon. A polygon without rings or
/// without bounds contains nothing.
pub fn point_in_polygon(polygon: &Polygon, point: &Point) -> bool {
    if !polygon.bounds().is_some_and(|b| b.contains_point(point)) {
        return false;
    }

    let Some(exterior) = polygon.exterior() else {
        return false;
    };
    if !point_in_ring(exterior, point) {
        return false;
    }

    !polygon.holes().iter().any(|hole| point_in_ring(hole, point))
}

/// Inside any one of the region's polygons, after a region-level bounds reject.
pub fn point_in_region(region: &Region, point: &Point) -> bool {
    if !region.bounds().is_some_and(|b| b.contains_point(point)) {
        return false;
    }

    region
        .polygons()
        .iter()
        .any(|polygon| point_in_polygon(polygon, point))
}
