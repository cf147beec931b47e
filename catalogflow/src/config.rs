//! Configuration for the catalog transport.

use crate::errors::CatalogflowError;
use crate::models::{Show, DEFAULT_IMAGE_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for fetching catalog pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root of the catalog API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version segment prepended to every path.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// API key sent as the `api_key` query parameter.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Base URL for poster images.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Additional query parameters sent with every request.
    #[serde(default)]
    pub query: HashMap<String, String>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/".to_string()
}

fn default_api_version() -> String {
    "3".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    "catalogflow/0.1".to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            api_key: None,
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            image_base_url: default_image_base_url(),
            query: HashMap::new(),
        }
    }
}

impl CatalogConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self, CatalogflowError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the base URL for poster images.
    #[must_use]
    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Values too large to represent saturate to [`Duration::MAX`]; values
    /// that are negative or not a number give [`Duration::ZERO`].
    /// [`validate`](Self::validate) rejects both.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds).unwrap_or_else(|_| {
            if self.timeout_seconds > 0.0 {
                Duration::MAX
            } else {
                Duration::ZERO
            }
        })
    }

    /// Returns the poster URL of `show` under the configured image host.
    #[must_use]
    pub fn image_url(&self, show: &Show) -> String {
        show.image_url_with_base(&self.image_base_url)
    }

    /// Builds the full URL for an endpoint path such as `/movie/popular`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks the configuration for values the transport cannot use.
    pub fn validate(&self) -> Result<(), CatalogflowError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CatalogflowError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if !self.image_base_url.starts_with("http://") && !self.image_base_url.starts_with("https://") {
            return Err(CatalogflowError::Config(format!(
                "image_base_url must be an http(s) URL, got '{}'",
                self.image_base_url
            )));
        }
        if self.timeout_seconds <= 0.0 {
            return Err(CatalogflowError::Config(format!(
                "timeout_seconds must be positive, got {}",
                self.timeout_seconds
            )));
        }
        Duration::try_from_secs_f64(self.timeout_seconds).map_err(|e| {
            CatalogflowError::Config(format!(
                "timeout_seconds {} is not a usable duration: {e}",
                self.timeout_seconds
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();

        assert_eq!(config.api_version, "3");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint() {
        let config = CatalogConfig::new();
        assert_eq!(
            config.endpoint("/movie/popular"),
            "https://api.themoviedb.org/3/movie/popular"
        );
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CatalogConfig::from_json(r#"{"api_key": "k", "timeout_seconds": 5}"#).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout_seconds, 5.0);
        assert_eq!(config.base_url, "https://api.themoviedb.org/");
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = CatalogConfig::new().with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();

        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(CatalogConfig::new().with_timeout(0.0).validate().is_err());
        assert!(CatalogConfig::new().with_base_url("ftp://example").validate().is_err());
        assert!(matches!(
            CatalogConfig::from_json("not json"),
            Err(CatalogflowError::Serialization(_))
        ));
    }

    #[test]
    fn test_huge_timeout_is_rejected_not_panicking() {
        let result = CatalogConfig::from_json(r#"{"timeout_seconds": 1e300}"#);
        assert!(matches!(result, Err(CatalogflowError::Config(_))));

        let config = CatalogConfig::new().with_timeout(1e300);
        assert_eq!(config.timeout(), Duration::MAX);
        assert_eq!(CatalogConfig::new().with_timeout(f64::NAN).timeout(), Duration::ZERO);
        assert!(CatalogConfig::new().with_timeout(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_image_url_uses_configured_host() {
        let show = Show::new(7, "Solaris").with_poster_path("/solaris.jpg");

        assert_eq!(
            CatalogConfig::new().image_url(&show),
            format!("{}solaris.jpg", DEFAULT_IMAGE_BASE_URL)
        );

        let config = CatalogConfig::from_json(
            r#"{"image_base_url": "https://cdn.example.org/posters/original"}"#,
        )
        .unwrap();
        assert_eq!(
            config.image_url(&show),
            "https://cdn.example.org/posters/original/solaris.jpg"
        );
        assert!(CatalogConfig::new()
            .with_image_base_url("file:///tmp")
            .validate()
            .is_err());
    }
}
