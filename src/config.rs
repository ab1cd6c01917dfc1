//! Run configuration: what to fetch and how politely to fetch it.

use crate::error::{GeotallyError, Result};
use std::time::Duration;

/// Observation fetch settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scientific name passed as the `taxon_name` filter
    #[serde(default = "Config::default_taxon")]
    pub taxon: String,

    /// Observed on or after this date (`YYYY-MM-DD`)
    #[serde(default = "Config::default_start_date")]
    pub start_date: String,

    /// Observed on or before this date (`YYYY-MM-DD`)
    #[serde(default = "Config::default_end_date")]
    pub end_date: String,

    #[serde(default = "Config::default_base_url")]
    pub base_url: String,

    #[serde(default = "Config::default_per_page")]
    pub per_page: u32,

    /// Hard stop for paging; higher pages need authenticated access.
    #[serde(default = "Config::default_max_pages")]
    pub max_pages: u32,

    /// Pause between page requests
    #[serde(default = "Config::default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    #[serde(default = "Config::default_user_agent")]
    pub user_agent: String,

    #[serde(default = "Config::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    fn default_taxon() -> String {
        "Podargus strigoides".to_string()
    }

    fn default_start_date() -> String {
        "2025-09-01".to_string()
    }

    fn default_end_date() -> String {
        "2025-11-30".to_string()
    }

    fn default_base_url() -> String {
        "https://api.inaturalist.org/v1/observations".to_string()
    }

    const fn default_per_page() -> u32 {
        200
    }

    const fn default_max_pages() -> u32 {
        100
    }

    const fn default_politeness_delay_ms() -> u64 {
        1100
    }

    fn default_user_agent() -> String {
        concat!("geotally/", env!("CARGO_PKG_VERSION")).to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    pub fn with_taxon(mut self, taxon: impl Into<String>) -> Self {
        self.taxon = taxon.into();
        self
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        assert!(per_page > 0, "Page size must be greater than zero");
        self.per_page = per_page;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        assert!(max_pages > 0, "Page cap must be greater than zero");
        self.max_pages = max_pages;
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects settings that would make paging meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(GeotallyError::InvalidConfig(
                "per_page must be greater than zero".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(GeotallyError::InvalidConfig(
                "max_pages must be greater than zero".to_string(),
            ));
        }
        if self.taxon.trim().is_empty() {
            return Err(GeotallyError::InvalidConfig("taxon must not be empty".to_string()));
        }
        Ok(())
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| GeotallyError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| GeotallyError::io(path, e))?;
        Self::from_toml_str(&content)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxon: Self::default_taxon(),
            start_date: Self::default_start_date(),
            end_date: Self::default_end_date(),
            base_url: Self::default_base_url(),
            per_page: Self::default_per_page(),
            max_pages: Self::default_max_pages(),
            politeness_delay_ms: Self::default_politeness_delay_ms(),
            user_agent: Self::default_user_agent(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}
