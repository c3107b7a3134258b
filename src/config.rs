// src/config.rs

use std::env;
use std::time::Duration;

/// Page size used when neither the environment nor the caller provides one.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Base URL used when `PROPLIST_API_URL` is unset. A bare path is resolved
/// against a localhost origin by the fetch layer.
pub const DEFAULT_BASE_URL: &str = "/api";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the listing pipeline.
///
/// The container is built once by the application shell and handed to
/// [`crate::TabbedListStore`] and [`crate::PropertyClient`] explicitly;
/// nothing in the crate reads the environment after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub default_page_size: u32,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    ///
    /// `PROPLIST_API_URL` supplies the backend base URL and
    /// `PROPLIST_PAGE_SIZE` the default page size; unset, empty, or
    /// unparsable values fall back to the crate defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("PROPLIST_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let default_page_size = env::var("PROPLIST_PAGE_SIZE")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            base_url,
            default_page_size,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.default_page_size, 24);
    }

    #[test]
    fn from_env_reads_overrides_and_ignores_junk() {
        env::set_var("PROPLIST_API_URL", "https://listings.example.com/v1");
        env::set_var("PROPLIST_PAGE_SIZE", "48");
        let config = AppConfig::from_env();
        assert_eq!(config.base_url, "https://listings.example.com/v1");
        assert_eq!(config.default_page_size, 48);

        env::set_var("PROPLIST_PAGE_SIZE", "not-a-number");
        let config = AppConfig::from_env();
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);

        env::remove_var("PROPLIST_API_URL");
        env::remove_var("PROPLIST_PAGE_SIZE");
    }
}
