//! Assigns geo-tagged observation points to named polygon regions and tallies
//! how many land in each.
//!
//! ```rust
//! use geotally::{Point, assign, regions_from_str};
//!
//! let geojson = r#"{"features": [{
//!     "properties": {"NAME": "Testville"},
//!     "geometry": {"type": "Polygon",
//!                  "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}
//! }]}"#;
//!
//! let regions = regions_from_str(geojson)?;
//! let report = assign(&regions, [Point::new(5.0, 5.0), Point::new(20.0, 5.0)]);
//! assert_eq!(report.counts.get("Testville"), 1);
//! assert_eq!(report.unassigned, 1);
//! # Ok::<(), geotally::GeotallyError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod observations;
pub mod report;

pub use config::Config;
pub use error::{GeotallyError, Result};

pub use compute::{
    CountTable, RegionIndex, TallyReport, assign, assign_indexed, detect_name_field,
    first_containing, load_regions, point_in_polygon, point_in_region, point_in_ring,
    region_name, regions_from_str,
};

pub use geotally_types::{BoundingBox2D, Point, Polygon, Region, RegionSet, Ring, union_bounds};

pub use observations::{INaturalistSource, ObservationQuery, ObservationSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{GeotallyError, Result};

    pub use crate::{BoundingBox2D, Point, Polygon, Region, RegionSet, Ring};

    pub use crate::{CountTable, RegionIndex, TallyReport, assign, assign_indexed, load_regions};

    pub use crate::{Config, ObservationQuery, ObservationSource};
}
