//! # geotally-types
//!
//! Plain value types for assigning geo-tagged points to named regions.
//!
//! - **Bounding boxes**: `BoundingBox2D`, with `union_bounds` for folding optional extents
//! - **Region geometry**: `Ring`, `Polygon`, `Region`, `RegionSet`
//!
//! Coordinates are planar `(longitude, latitude)` pairs in WGS84 degrees and are
//! carried in `geo::Point`. Bounding boxes are computed once, bottom-up, when a
//! polygon or region is built, and never change afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use geotally_types::polygon::{Polygon, Region, Ring};
//! use geo::Point;
//!
//! let square = Ring::closed(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! assert!(square.is_closed());
//!
//! let region = Region::new("Testville", vec![Polygon::new(vec![square])]);
//! let bounds = region.bounds().unwrap();
//! assert_eq!(bounds.max_x(), 10.0);
//! ```

pub mod bbox;
pub mod polygon;

pub use bbox::{BoundingBox2D, union_bounds};
pub use geo::Point;
pub use polygon::{Polygon, Region, RegionSet, Ring};
