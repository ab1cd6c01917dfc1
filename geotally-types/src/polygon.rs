use crate::bbox::{BoundingBox2D, union_bounds};
use geo::Point;
use serde::{Deserialize, Serialize};

/// One closed loop of `(lon, lat)` points: an outer boundary or a hole.
///
/// A ring with fewer than three points is degenerate. It is kept as-is and
/// simply never contains anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Wraps the points verbatim, without enforcing closure.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Wraps the points and appends the first point if the loop is open.
    pub fn closed(mut points: Vec<Point>) -> Self {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied())
            && first != last
        {
            points.push(first);
        }
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last points are coordinate-equal. Empty rings count as closed.
    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    /// Fewer than three distinct points, counting the closing point only once.
    pub fn is_degenerate(&self) -> bool {
        let mut distinct: Vec<&Point> = Vec::with_capacity(3);
        for point in &self.points {
            if !distinct.contains(&point) {
                distinct.push(point);
                if distinct.len() == 3 {
                    return false;
                }
            }
        }
        true
    }

    /// Axis-aligned bounds of the ring, `None` when it has no points.
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.points)
    }
}

/// Outer ring at index 0, holes after it, plus cached bounds over all rings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    rings: Vec<Ring>,
    bounds: Option<BoundingBox2D>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        let bounds = rings
            .iter()
            .fold(None, |acc, ring| union_bounds(acc, ring.bounds()));
        Self { rings, bounds }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn bounds(&self) -> Option<BoundingBox2D> {
        self.bounds
    }
}

/// A named area (a "suburb") made of one or more polygons.
///
/// Names are not required to be unique. Built once from a single feature and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    name: String,
    polygons: Vec<Polygon>,
    bounds: Option<BoundingBox2D>,
}

impl Region {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        let bounds = polygons
            .iter()
            .fold(None, |acc, polygon| union_bounds(acc, polygon.bounds()));
        Self {
            name: name.into(),
            polygons,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn bounds(&self) -> Option<BoundingBox2D> {
        self.bounds
    }
}

/// All regions loaded from one input, in load order, plus their combined bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionSet {
    regions: Vec<Region>,
    bounds: Option<BoundingBox2D>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        let bounds = regions
            .iter()
            .fold(None, |acc, region| union_bounds(acc, region.bounds()));
        Self { regions, bounds }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Union of every region's bounds; parameterizes the observation fetch.
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        self.bounds
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
