//! R*-tree over region bounding boxes.
//!
//! The tree only narrows the candidate list. The exact test is still
//! [`point_in_region`], and among all matching candidates the one loaded first
//! wins, so results are identical to the linear first-match scan.

use crate::compute::containment::point_in_region;
use geotally_types::{BoundingBox2D, Point, Region, RegionSet};
use rstar::{AABB, RTree};

/// Region bounds tagged with the region's load position.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedBounds {
    pub position: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl IndexedBounds {
    fn new(position: usize, bounds: &BoundingBox2D) -> Self {
        Self {
            position,
            min_x: bounds.min_x(),
            min_y: bounds.min_y(),
            max_x: bounds.max_x(),
            max_y: bounds.max_y(),
        }
    }
}

impl rstar::RTreeObject for IndexedBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

pub struct RegionIndex<'a> {
    regions: &'a RegionSet,
    tree: RTree<IndexedBounds>,
}

impl<'a> RegionIndex<'a> {
    /// Bulk loads the bounds of every region. Regions without bounds contain
    /// nothing and are left out.
    pub fn new(regions: &'a RegionSet) -> Self {
        let entries = regions
            .iter()
            .enumerate()
            .filter_map(|(position, region)| {
                region
                    .bounds()
                    .map(|bounds| IndexedBounds::new(position, &bounds))
            })
            .collect();

        Self {
            regions,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn regions(&self) -> &'a RegionSet {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Load positions of regions whose bounds contain `point`, unordered.
    pub fn candidates(&self, point: &Point) -> impl Iterator<Item = usize> + '_ {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.position)
    }

    /// First region in load order containing `point`.
    pub fn first_containing(&self, point: &Point) -> Option<&'a Region> {
        let regions = self.regions;
        self.candidates(point)
            .filter(|&position| point_in_region(&regions.regions()[position], point))
            .min()
            .map(|position| &regions.regions()[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::assignment::{assign, assign_indexed, first_containing};
    use geotally_types::{Polygon, Ring};

    fn square_region(name: &str, min_x: f64, min_y: f64, size: f64) -> Region {
        let ring = Ring::closed(vec![
            Point::new(min_x, min_y),
            Point::new(min_x + size, min_y),
            Point::new(min_x + size, min_y + size),
            Point::new(min_x, min_y + size),
        ]);
        Region::new(name, vec![Polygon::new(vec![ring])])
    }

    fn grid() -> RegionSet {
        let mut regions = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                regions.push(square_region(
                    &format!("cell-{i}-{j}"),
                    i as f64,
                    j as f64,
                    1.0,
                ));
            }
        }
        // Overlaps the whole grid but loads last, so it only gets leftovers.
        regions.push(square_region("blanket", -1.0, -1.0, 10.0));
        RegionSet::new(regions)
    }

    #[test]
    fn test_empty_regions_are_not_indexed() {
        let regions = RegionSet::new(vec![
            Region::new("Nowhere", Vec::new()),
            square_region("Somewhere", 0.0, 0.0, 1.0),
        ]);
        let index = RegionIndex::new(&regions);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.first_containing(&Point::new(0.5, 0.5)).map(Region::name),
            Some("Somewhere")
        );
    }

    #[test]
    fn test_first_match_preserved_for_overlaps() {
        let regions = RegionSet::new(vec![
            square_region("A", 0.0, 0.0, 10.0),
            square_region("B", 5.0, 5.0, 10.0),
        ]);
        let index = RegionIndex::new(&regions);
        let p = Point::new(7.0, 7.0);
        assert_eq!(index.first_containing(&p).map(Region::name), Some("A"));
        assert_eq!(index.candidates(&p).count(), 2);
    }

    #[test]
    fn test_agrees_with_linear_scan() {
        let regions = grid();
        let index = RegionIndex::new(&regions);

        let mut points = Vec::new();
        for i in -15..=95 {
            for j in -15..=95 {
                points.push(Point::new(i as f64 * 0.1 + 0.05, j as f64 * 0.1 + 0.05));
            }
        }

        for p in &points {
            assert_eq!(
                index.first_containing(p).map(Region::name),
                first_containing(&regions, p).map(Region::name),
                "disagreement at {p:?}"
            );
        }

        let linear = assign(&regions, points.iter().copied());
        let indexed = assign_indexed(&index, points.iter().copied());
        assert_eq!(linear, indexed);
        assert!(linear.counts.get("blanket") > 0);
        assert!(linear.unassigned > 0);
    }
}
