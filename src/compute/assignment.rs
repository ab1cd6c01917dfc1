//! Assigning observation points to regions and tallying counts per name.
//!
//! Each point goes to the *first* region, in load order, that contains it.
//! Overlapping regions are not resolved any further: a later region never sees
//! a point an earlier region already took. Points outside every region are only
//! reflected in [`TallyReport::unassigned`].

use crate::compute::containment::point_in_region;
use crate::compute::index::RegionIndex;
use geotally_types::{Point, Region, RegionSet};
use log::debug;
use rustc_hash::FxHashMap;

/// Region name to count, in the order names first received a point.
///
/// Absent names count as zero. Names are shared by all regions that carry
/// them, so duplicate region names pool their counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountTable {
    entries: Vec<(String, u64)>,
    positions: FxHashMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `name`, inserting it at the end on first sight.
    pub fn increment(&mut self, name: &str) {
        match self.positions.get(name) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), 1));
            }
        }
    }

    pub fn get(&self, name: &str) -> u64 {
        self.positions
            .get(name)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all names.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Name with the highest count.
    ///
    /// Ties go to the name that first received a point, since the scan only
    /// replaces the leader on a strictly greater count. `None` when empty.
    pub fn top(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (name, count) in self.iter() {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best
    }
}

/// Outcome of assigning a stream of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TallyReport {
    pub counts: CountTable,
    /// Points that landed in some region.
    pub assigned: usize,
    /// Points outside every region.
    pub unassigned: usize,
}

impl TallyReport {
    /// See [`CountTable::top`].
    pub fn top_region(&self) -> Option<(&str, u64)> {
        self.counts.top()
    }

    pub fn total_points(&self) -> usize {
        self.assigned + self.unassigned
    }
}

/// First region, in load order, containing `point`.
pub fn first_containing<'a>(regions: &'a RegionSet, point: &Point) -> Option<&'a Region> {
    regions
        .iter()
        .find(|region| point_in_region(region, point))
}

/// Assigns every point with a linear scan over the regions.
///
/// # Examples
///
/// ```
/// use geotally::compute::assignment::assign;
/// use geotally_types::{Point, Polygon, Region, RegionSet, Ring};
///
/// let square = Ring::closed(vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ]);
/// let regions = RegionSet::new(vec![Region::new("Testville", vec![Polygon::new(vec![square])])]);
///
/// let points = [Point::new(5.0, 5.0), Point::new(20.0, 20.0), Point::new(1.0, 1.0)];
/// let report = assign(&regions, points);
///
/// assert_eq!(report.counts.get("Testville"), 2);
/// assert_eq!(report.top_region(), Some(("Testville", 2)));
/// ```
pub fn assign<I>(regions: &RegionSet, points: I) -> TallyReport
where
    I: IntoIterator<Item = Point>,
{
    tally(points, |point| first_containing(regions, point))
}

/// Same result as [`assign`], with candidates narrowed by a [`RegionIndex`].
pub fn assign_indexed<I>(index: &RegionIndex<'_>, points: I) -> TallyReport
where
    I: IntoIterator<Item = Point>,
{
    tally(points, |point| index.first_containing(point))
}

fn tally<'a, I, F>(points: I, mut locate: F) -> TallyReport
where
    I: IntoIterator<Item = Point>,
    F: FnMut(&Point) -> Option<&'a Region>,
{
    let mut report = TallyReport::default();
    for point in points {
        match locate(&point) {
            Some(region) => {
                report.counts.increment(region.name());
                report.assigned += 1;
            }
            None => report.unassigned += 1,
        }
    }
    debug!(
        "Assigned {} points to {} regions, {} unassigned",
        report.assigned,
        report.counts.len(),
        report.unassigned
    );
    report
}
