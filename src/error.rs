//! Error types for ingestion, fetching and reporting.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeotallyError>;

#[derive(Debug, Error)]
pub enum GeotallyError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid GeoJSON (no features array)")]
    MissingFeatures,

    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("No area features (Polygon/MultiPolygon) found in GeoJSON")]
    NoAreaFeatures,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GeotallyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
