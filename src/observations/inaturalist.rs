//! Paged client for `GET /v1/observations`.

use super::http::{HttpClient, ReqwestClient};
use super::{ObservationQuery, ObservationSource};
use crate::config::Config;
use crate::error::{GeotallyError, Result};
use geotally_types::Point;
use log::{debug, info, warn};
use serde_json::Value;
use std::thread;

/// Pages through iNaturalist observations, pausing between requests.
pub struct INaturalistSource<C = ReqwestClient> {
    client: C,
    config: Config,
}

impl INaturalistSource<ReqwestClient> {
    pub fn from_config(config: Config) -> Result<Self> {
        let client = ReqwestClient::new(&config)?;
        Ok(Self::new(client, config))
    }
}

impl<C: HttpClient> INaturalistSource<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self { client, config }
    }

    /// URL for one page. Bounding box values are written with six decimals.
    pub fn page_url(&self, query: &ObservationQuery, page: u32) -> Result<String> {
        let (swlat, swlng) = query.bounds.south_west();
        let (nelat, nelng) = query.bounds.north_east();
        let params = [
            ("taxon_name", query.taxon.clone()),
            ("d1", query.start_date.clone()),
            ("d2", query.end_date.clone()),
            ("swlat", format!("{:.6}", swlat)),
            ("swlng", format!("{:.6}", swlng)),
            ("nelat", format!("{:.6}", nelat)),
            ("nelng", format!("{:.6}", nelng)),
            ("geo", "true".to_string()),
            ("order_by", "observed_on".to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("page", page.to_string()),
        ];

        reqwest::Url::parse_with_params(&self.config.base_url, &params)
            .map(String::from)
            .map_err(|e| {
                GeotallyError::InvalidConfig(format!(
                    "Invalid base URL {:?}: {}",
                    self.config.base_url, e
                ))
            })
    }
}

impl<C: HttpClient> ObservationSource for INaturalistSource<C> {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Point>> {
        let per_page = u64::from(self.config.per_page);
        let mut points = Vec::new();
        let mut total_results: Option<u64> = None;
        let mut page: u32 = 1;

        loop {
            let url = self.page_url(query, page)?;
            debug!("Fetching observations page {}", page);
            let body = self.client.get(&url)?;
            let json: Value = serde_json::from_str(&body).map_err(|e| {
                GeotallyError::InvalidResponse(format!("page {}: {}", page, e))
            })?;

            if total_results.is_none() {
                total_results = json.get("total_results").and_then(Value::as_u64);
            }

            let Some(results) = json.get("results").and_then(Value::as_array) else {
                break;
            };
            if results.is_empty() {
                break;
            }
            points.extend(results.iter().filter_map(observation_point));

            if (results.len() as u64) < per_page {
                break;
            }
            if total_results.is_some_and(|total| u64::from(page) * per_page >= total) {
                break;
            }
            if page >= self.config.max_pages {
                warn!(
                    "Reached page {}; further pages may require authentication. Stopping.",
                    page
                );
                break;
            }

            page += 1;
            let delay = self.config.politeness_delay();
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        info!(
            "Fetched {} observations with coordinates over {} page(s)",
            points.len(),
            page
        );
        Ok(points)
    }
}

/// Location of one observation record.
///
/// `geojson.coordinates` (`[lon, lat]`) is preferred; the flat `latitude` /
/// `longitude` fields are the fallback. Records with neither yield `None`.
pub fn observation_point(record: &Value) -> Option<Point> {
    let from_geojson = record
        .get("geojson")
        .and_then(|geojson| geojson.get("coordinates"))
        .and_then(Value::as_array)
        .filter(|coords| coords.len() == 2)
        .and_then(|coords| Some(Point::new(coords[0].as_f64()?, coords[1].as_f64()?)));

    from_geojson.or_else(|| {
        let lat = coordinate(record.get("latitude")?)?;
        let lon = coordinate(record.get("longitude")?)?;
        Some(Point::new(lon, lat))
    })
}

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotally_types::BoundingBox2D;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned bodies in order; `None` simulates a failed request.
    struct CannedClient {
        pages: RefCell<VecDeque<Option<String>>>,
        requested: RefCell<Vec<String>>,
    }

    impl CannedClient {
        fn new(pages: Vec<Option<Value>>) -> Self {
            Self {
                pages: RefCell::new(
                    pages
                        .into_iter()
                        .map(|page| page.map(|v| v.to_string()))
                        .collect(),
                ),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpClient for &CannedClient {
        fn get(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.borrow_mut().pop_front() {
                Some(Some(body)) => Ok(body),
                Some(None) => Err(GeotallyError::Http("HTTP 503".to_string())),
                None => panic!("unexpected request: {url}"),
            }
        }
    }

    fn query() -> ObservationQuery {
        ObservationQuery::new(
            "Podargus strigoides",
            "2025-09-01",
            "2025-11-30",
            BoundingBox2D::new(144.5, -38.5, 145.5, -37.5),
        )
    }

    fn config(per_page: u32, max_pages: u32) -> Config {
        Config::default()
            .with_base_url("https://example.test/v1/observations")
            .with_per_page(per_page)
            .with_max_pages(max_pages)
            .with_politeness_delay(std::time::Duration::ZERO)
    }

    fn record(lon: f64, lat: f64) -> Value {
        json!({"geojson": {"type": "Point", "coordinates": [lon, lat]}})
    }

    #[test]
    fn test_page_url() {
        let client = CannedClient::new(Vec::new());
        let source = INaturalistSource::new(&client, config(200, 100));
        let url = source.page_url(&query(), 3).unwrap();

        assert!(url.starts_with("https://example.test/v1/observations?"));
        assert!(url.contains("taxon_name=Podargus+strigoides"));
        assert!(url.contains("d1=2025-09-01"));
        assert!(url.contains("d2=2025-11-30"));
        assert!(url.contains("swlat=-38.500000"));
        assert!(url.contains("swlng=144.500000"));
        assert!(url.contains("nelat=-37.500000"));
        assert!(url.contains("nelng=145.500000"));
        assert!(url.contains("geo=true"));
        assert!(url.contains("order_by=observed_on"));
        assert!(url.contains("per_page=200"));
        assert!(url.ends_with("page=3"));
    }

    #[test]
    fn test_short_page_stops() {
        let client = CannedClient::new(vec![
            Some(json!({"total_results": 5, "results": [record(1.0, 2.0), record(3.0, 4.0)]})),
        ]);
        let source = INaturalistSource::new(&client, config(3, 100));
        let points = source.fetch(&query()).unwrap();

        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(client.requested.borrow().len(), 1);
    }

    #[test]
    fn test_pages_until_total_results() {
        let client = CannedClient::new(vec![
            Some(json!({"total_results": 4, "results": [record(1.0, 1.0), record(2.0, 2.0)]})),
            Some(json!({"total_results": 4, "results": [record(3.0, 3.0), record(4.0, 4.0)]})),
        ]);
        let source = INaturalistSource::new(&client, config(2, 100));
        let points = source.fetch(&query()).unwrap();

        assert_eq!(points.len(), 4);
        let requested = client.requested.borrow();
        assert_eq!(requested.len(), 2);
        assert!(requested[0].ends_with("page=1"));
        assert!(requested[1].ends_with("page=2"));
    }

    #[test]
    fn test_empty_or_missing_results_stop() {
        let client = CannedClient::new(vec![
            Some(json!({"results": [record(1.0, 1.0)]})),
            Some(json!({"results": []})),
        ]);
        let source = INaturalistSource::new(&client, config(1, 100));
        assert_eq!(source.fetch(&query()).unwrap().len(), 1);

        let client = CannedClient::new(vec![Some(json!({"error": "nope"}))]);
        let source = INaturalistSource::new(&client, config(1, 100));
        assert!(source.fetch(&query()).unwrap().is_empty());
    }

    #[test]
    fn test_page_cap() {
        let full = || Some(json!({"results": [record(1.0, 1.0)]}));
        let client = CannedClient::new(vec![full(), full(), full()]);
        let source = INaturalistSource::new(&client, config(1, 3));
        assert_eq!(source.fetch(&query()).unwrap().len(), 3);
        assert_eq!(client.requested.borrow().len(), 3);
    }

    #[test]
    fn test_failed_page_aborts_fetch() {
        let client = CannedClient::new(vec![
            Some(json!({"results": [record(1.0, 1.0)]})),
            None,
        ]);
        let source = INaturalistSource::new(&client, config(1, 100));
        assert!(matches!(
            source.fetch(&query()),
            Err(GeotallyError::Http(_))
        ));
    }

    #[test]
    fn test_unparseable_page() {
        let client = CannedClient {
            pages: RefCell::new(VecDeque::from([Some("<html>".to_string())])),
            requested: RefCell::new(Vec::new()),
        };
        let source = INaturalistSource::new(&client, config(1, 100));
        assert!(matches!(
            source.fetch(&query()),
            Err(GeotallyError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_observation_point_fallbacks() {
        assert_eq!(
            observation_point(&record(145.0, -37.8)),
            Some(Point::new(145.0, -37.8))
        );
        assert_eq!(
            observation_point(&json!({"geojson": null, "latitude": -37.8, "longitude": 145.0})),
            Some(Point::new(145.0, -37.8))
        );
        assert_eq!(
            observation_point(&json!({"latitude": "-37.8", "longitude": "145.0"})),
            Some(Point::new(145.0, -37.8))
        );
        assert_eq!(
            observation_point(&json!({"geojson": {"coordinates": [1.0]}, "latitude": 2.0, "longitude": 3.0})),
            Some(Point::new(3.0, 2.0))
        );
        assert_eq!(observation_point(&json!({"latitude": null, "longitude": 1.0})), None);
        assert_eq!(observation_point(&json!({"id": 12})), None);
    }
}
