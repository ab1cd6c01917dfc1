//! Containment, ingestion and aggregation.

pub mod assignment;
pub mod containment;
pub mod geojson;
pub mod index;

pub use assignment::{CountTable, TallyReport, assign, assign_indexed, first_containing};
pub use containment::{point_in_polygon, point_in_region, point_in_ring};
pub use geojson::{detect_name_field, load_regions, region_name, regions_from_str};
pub use index::RegionIndex;
