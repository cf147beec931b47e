//! HTTP transport on `reqwest`.

use super::{CatalogTransport, Category, StatusFailure};
use crate::config::CatalogConfig;
use crate::errors::CatalogflowError;
use crate::models::ShowPage;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// Fetches catalog pages from a TMDB-compatible REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogTransport {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalogTransport {
    /// Creates a transport with its own client.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogflowError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogflowError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Creates a transport sharing an existing client.
    pub fn with_client(client: reqwest::Client, config: CatalogConfig) -> Result<Self, CatalogflowError> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalogTransport {
    async fn fetch(&self, category: Category) -> anyhow::Result<ShowPage> {
        let url = self.config.endpoint(category.path());
        let start = Instant::now();

        let mut request = self.client.get(&url).query(&self.config.query);
        if let Some(ref key) = self.config.api_key {
            request = request.query(&[("api_key", key)]);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("GET {}", category.path()))?;

        let status = response.status();
        debug!(
            category = %category,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "catalog response received"
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        category = %category,
                        status = status.as_u16(),
                        error = %e,
                        "failed to read error response body"
                    );
                    String::new()
                }
            };
            return Err(StatusFailure::new(status.as_u16(), body).into());
        }

        response
            .json::<ShowPage>()
            .await
            .with_context(|| format!("decoding {} page", category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{classify, ErrorKind};

    #[test]
    fn test_rejects_invalid_config() {
        let result = HttpCatalogTransport::new(CatalogConfig::new().with_timeout(-1.0));
        assert!(matches!(result, Err(CatalogflowError::Config(_))));

        let result = HttpCatalogTransport::new(CatalogConfig::new().with_timeout(1e300));
        assert!(matches!(result, Err(CatalogflowError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = CatalogConfig::new()
            .with_base_url("http://127.0.0.1:9/")
            .with_timeout(2.0);
        let transport = HttpCatalogTransport::new(config).unwrap();

        let failure = transport.fetch(Category::TvPopular).await.unwrap_err();

        assert!(matches!(
            classify(failure),
            ErrorKind::NetworkError { .. } | ErrorKind::TimeoutError { .. }
        ));
    }
}
