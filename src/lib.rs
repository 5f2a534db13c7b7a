//! Buy/sell rates scraped from an Indonesian money changer's home page, and
//! conversion of foreign amounts to IDR at those rates.
//!
//! ```no_run
//! use kurs::{CurrencyService, RateKind, SourceConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut service = CurrencyService::new(SourceConfig::default())?;
//! match service.convert(100.0, "USD", "IDR", RateKind::Sell).await? {
//!     Some(idr) => println!("100 USD = {} IDR", idr),
//!     None => println!("USD is not listed"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod number;
pub mod timestamp;

pub use api::{PageSource, RateClient};
pub use cache::CurrencyService;
pub use config::{SourceConfig, TARGET_CURRENCY};
pub use error::{ConversionError, ExtractionError};
pub use extract::{extract, extract_at};
pub use models::{CurrencyRate, CurrencyTable, ExtractionResult, RateKind, RatesResponse, ResponseStatus};
