//! Fetching observation points for a taxon, date range and bounding box.
//!
//! The engine only needs a stream of `(lon, lat)` points; where they come from
//! is behind [`ObservationSource`]. The bundled source pages through the
//! iNaturalist v1 observations API.

pub mod http;
pub mod inaturalist;

pub use http::{HttpClient, ReqwestClient};
pub use inaturalist::INaturalistSource;

use crate::config::Config;
use crate::error::Result;
use geotally_types::{BoundingBox2D, Point};

/// Filter for one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationQuery {
    pub taxon: String,
    pub start_date: String,
    pub end_date: String,
    pub bounds: BoundingBox2D,
}

impl ObservationQuery {
    pub fn new(
        taxon: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        bounds: BoundingBox2D,
    ) -> Self {
        Self {
            taxon: taxon.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            bounds,
        }
    }

    pub fn from_config(config: &Config, bounds: BoundingBox2D) -> Self {
        Self::new(
            config.taxon.clone(),
            config.start_date.clone(),
            config.end_date.clone(),
            bounds,
        )
    }
}

/// Anything that can produce the observation points for a query.
///
/// A failure anywhere aborts the whole fetch; partial results are never returned.
pub trait ObservationSource {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Point>>;
}
