use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.uexcorp.space/2.0";

/// Query parameters for a collection request; every filter upstream is a numeric id.
pub type Query<'a> = &'a [(&'a str, u64)];

/// Raw GET access to the upstream API. Returns the response body as text.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, query: Query<'_>) -> Result<String>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("uex-destinations/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Upstream {
                endpoint: "client setup".to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, query: Query<'_>) -> Result<String> {
        let upstream = |source| Error::Upstream {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.url(endpoint))
            .query(query)
            .send()
            .await
            .map_err(upstream)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status: format!("HTTP {}", status),
            });
        }

        response.text().await.map_err(upstream)
    }
}
