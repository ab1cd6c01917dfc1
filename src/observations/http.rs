//! HTTP client abstraction so paging can be tested without a network.

use crate::config::Config;
use crate::error::{GeotallyError, Result};
use log::trace;

/// Blocking GET returning the response body as text.
pub trait HttpClient {
    /// Non-2xx statuses are errors.
    fn get(&self, url: &str) -> Result<String>;
}

/// Real HTTP client implementation using `reqwest::blocking`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeotallyError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String> {
        trace!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GeotallyError::Http(format!("{} ({})", e, url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeotallyError::Http(format!(
                "HTTP {} for URL: {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .map_err(|e| GeotallyError::Http(format!("Failed to read response body: {}", e)))
    }
}
