use log::{debug, info};

use crate::api::{PageSource, RateClient};
use crate::config::{SourceConfig, TARGET_CURRENCY};
use crate::error::{ConversionError, ExtractionError};
use crate::models::{ExtractionResult, RateKind, RatesResponse};

/// Converts amounts to IDR, holding on to the first successful extraction.
///
/// The cached table never expires; call [`CurrencyService::refresh`] for
/// fresh rates.
#[derive(Debug)]
pub struct CurrencyService {
    client: RateClient,
    cached: Option<ExtractionResult>,
}

impl CurrencyService {
    pub fn new(config: SourceConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            client: RateClient::new(config)?,
            cached: None,
        })
    }

    /// A service that starts out with `result` already cached.
    pub fn with_result(client: RateClient, result: ExtractionResult) -> Self {
        Self {
            client,
            cached: Some(result),
        }
    }

    /// A service whose cache is primed from a page the caller fetched.
    pub async fn with_page(client: RateClient, page: String) -> Result<Self, ExtractionError> {
        let result = client.extract(PageSource::Provided(page)).await?;
        Ok(Self::with_result(client, result))
    }

    pub fn cached(&self) -> Option<&ExtractionResult> {
        self.cached.as_ref()
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }

    /// Fetches the page again and replaces the cache. The old table is kept
    /// when the fetch fails.
    pub async fn refresh(&mut self) -> Result<&ExtractionResult, ExtractionError> {
        let result = self.load().await?;
        Ok(self.cached.insert(result))
    }

    /// The cached extraction, fetching it on first use.
    pub async fn rates(&mut self) -> Result<&ExtractionResult, ExtractionError> {
        let result = match self.cached.take() {
            Some(result) => {
                debug!("Using cached rate table");
                result
            }
            None => self.load().await?,
        };
        Ok(self.cached.insert(result))
    }

    async fn load(&self) -> Result<ExtractionResult, ExtractionError> {
        let result = self.client.extract(PageSource::Fetch).await?;
        info!("Loaded {} currency rates", result.currencies.len());
        Ok(result)
    }

    /// Status envelope around [`CurrencyService::rates`]. Never fails; errors
    /// end up in the message.
    pub async fn get_currencies(&mut self) -> RatesResponse {
        match self.rates().await {
            Ok(result) => RatesResponse::success(result.clone()),
            Err(e) => RatesResponse::error(e.to_string()),
        }
    }

    /// Converts `amount` of `from` into `to` at the `which` rate.
    ///
    /// `Ok(None)` means the page does not list `from`. Only IDR is accepted
    /// as `to`, and that is checked before anything is fetched.
    pub async fn convert(
        &mut self,
        amount: f64,
        from: &str,
        to: &str,
        which: RateKind,
    ) -> Result<Option<f64>, ConversionError> {
        if !to.trim().eq_ignore_ascii_case(TARGET_CURRENCY) {
            return Err(ConversionError::UnsupportedTarget(to.to_string()));
        }

        let result = self.rates().await.map_err(ConversionError::RateUnavailable)?;
        Ok(result
            .currencies
            .get(from.trim())
            .map(|rate| amount * rate.get(which)))
    }
}
