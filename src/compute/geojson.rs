//! GeoJSON FeatureCollection ingestion into a [`RegionSet`].
//!
//! Only `Polygon` and `MultiPolygon` features become regions; every other
//! geometry type, and features without geometry, are skipped. A top-level
//! `"type": "FeatureCollection"` member is not required, only a `features`
//! array.

use crate::error::{GeotallyError, Result};
use geojson::{Geometry, PolygonType, Position, Value as GeometryValue};
use geotally_types::{Point, Polygon, Region, RegionSet, Ring};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Property keys tried, in order, when looking for a region's name.
pub const NAME_FIELD_CANDIDATES: [&str; 12] = [
    "NAME",
    "Name",
    "name",
    "LOCALITY_NAME",
    "LOCALITY",
    "LOC_NAME",
    "vic_loca_2",
    "vic_loca_1",
    "vic_loca_",
    "SUBURB_NAME",
    "SuburbName",
    "suburb",
];

/// Name given to regions whose properties hold no string at all.
pub const UNKNOWN_REGION_NAME: &str = "UNKNOWN";

/// Finds the property key that holds the region name.
///
/// The first [`NAME_FIELD_CANDIDATES`] key with a string value wins. Otherwise
/// the first string-valued property in source order is used. Source order is
/// kept because `serde_json` is built with `preserve_order`.
///
/// # Examples
///
/// ```
/// use geotally::compute::geojson::detect_name_field;
/// use serde_json::json;
///
/// let props = json!({"foo": "Bar", "NAME": "Central"});
/// assert_eq!(detect_name_field(props.as_object().unwrap()), Some("NAME"));
///
/// let props = json!({"count": 5});
/// assert_eq!(detect_name_field(props.as_object().unwrap()), None);
/// ```
pub fn detect_name_field(props: &Map<String, Value>) -> Option<&str> {
    if let Some(key) = NAME_FIELD_CANDIDATES
        .iter()
        .find(|key| props.get(**key).is_some_and(Value::is_string))
    {
        return Some(*key);
    }

    props
        .iter()
        .find(|(_, value)| value.is_string())
        .map(|(key, _)| key.as_str())
}

/// Region name from a feature's property bag, or [`UNKNOWN_REGION_NAME`].
pub fn region_name(props: Option<&Map<String, Value>>) -> String {
    props
        .and_then(|props| {
            let key = detect_name_field(props)?;
            props.get(key).and_then(Value::as_str)
        })
        .unwrap_or(UNKNOWN_REGION_NAME)
        .to_string()
}

/// Reads and ingests a GeoJSON file.
pub fn load_regions(path: impl AsRef<Path>) -> Result<RegionSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| GeotallyError::io(path, e))?;
    let regions = regions_from_str(&content)?;
    info!("Loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

/// Parses and ingests a GeoJSON document.
pub fn regions_from_str(geojson: &str) -> Result<RegionSet> {
    let document: Value = serde_json::from_str(geojson)?;
    regions_from_value(&document)
}

/// Builds a [`RegionSet`] from an already parsed document.
///
/// Fails when there is no `features` array, when a Polygon/MultiPolygon has
/// malformed coordinates, or when no area feature is found at all.
pub fn regions_from_value(document: &Value) -> Result<RegionSet> {
    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or(GeotallyError::MissingFeatures)?;

    let mut regions = Vec::new();
    for (index, feature) in features.iter().enumerate() {
        let geometry = match feature.get("geometry") {
            Some(geometry) if !geometry.is_null() => geometry,
            _ => {
                debug!("Feature {} has no geometry, skipping", index);
                continue;
            }
        };

        let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("");
        if kind != "Polygon" && kind != "MultiPolygon" {
            debug!("Feature {} is not an area ({:?}), skipping", index, kind);
            continue;
        }

        let polygons = area_polygons(geometry).map_err(|e| match e {
            GeotallyError::MalformedGeometry(msg) => {
                GeotallyError::MalformedGeometry(format!("feature {}: {}", index, msg))
            }
            other => other,
        })?;
        let name = region_name(feature.get("properties").and_then(Value::as_object));
        regions.push(Region::new(name, polygons));
    }

    if regions.is_empty() {
        return Err(GeotallyError::NoAreaFeatures);
    }

    let set = RegionSet::new(regions);
    if let Some(bounds) = set.bounds() {
        debug!(
            "Region bounds: [{}, {}] to [{}, {}]",
            bounds.min_x(),
            bounds.min_y(),
            bounds.max_x(),
            bounds.max_y()
        );
    }
    Ok(set)
}

/// Every returned polygon has at least one point, so its region has bounds.
fn area_polygons(geometry: &Value) -> Result<Vec<Polygon>> {
    let geometry = Geometry::deserialize(geometry)
        .map_err(|e| GeotallyError::MalformedGeometry(e.to_string()))?;

    let polygons = match geometry.value {
        GeometryValue::Polygon(rings) => vec![polygon_from_rings(&rings)?],
        GeometryValue::MultiPolygon(polygons) => polygons
            .iter()
            .map(polygon_from_rings)
            .collect::<Result<Vec<_>>>()?,
        _ => {
            return Err(GeotallyError::MalformedGeometry(
                "expected a Polygon or MultiPolygon".to_string(),
            ));
        }
    };

    if polygons.is_empty() || polygons.iter().any(|polygon| polygon.bounds().is_none()) {
        return Err(GeotallyError::MalformedGeometry(
            "area geometry has no coordinates".to_string(),
        ));
    }
    Ok(polygons)
}

fn polygon_from_rings(rings: &PolygonType) -> Result<Polygon> {
    let rings = rings
        .iter()
        .map(|positions| ring_from_positions(positions))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(rings))
}

fn ring_from_positions(positions: &[Position]) -> Result<Ring> {
    let points = positions
        .iter()
        .map(|coords| {
            if coords.len() < 2 {
                return Err(GeotallyError::MalformedGeometry(
                    "Coordinate must have at least 2 values".to_string(),
                ));
            }
            Ok(Point::new(coords[0], coords[1]))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Ring::closed(points))
}
