use log::debug;
use reqwest::Client;

use crate::config::SourceConfig;
use crate::error::{ExtractionError, Result};
use crate::extract;
use crate::models::ExtractionResult;

/// Where the page to extract comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Page content the caller already has.
    Provided(String),
    /// Download the configured rate page.
    Fetch,
}

/// HTTP client for the money changer's rate page.
#[derive(Debug, Clone)]
pub struct RateClient {
    client: Client,
    config: SourceConfig,
}

impl RateClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, config })
    }

    /// Single GET of the rate page. No retries.
    pub async fn fetch_page(&self) -> Result<String> {
        debug!("Fetching rate page from {}", self.config.url);
        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Fetch {
                status: Some(status.as_u16()),
                message: format!("HTTP status {} from {}", status, self.config.url),
            });
        }

        Ok(response.text().await?)
    }

    pub async fn extract(&self, source: PageSource) -> Result<ExtractionResult> {
        match source {
            PageSource::Provided(page) => extract::extract(&page),
            PageSource::Fetch => {
                let page = self.fetch_page().await?;
                extract::extract(&page)
            }
        }
    }
}
