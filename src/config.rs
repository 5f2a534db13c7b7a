use std::time::Duration;

/// The only currency conversions are reported in.
pub const TARGET_CURRENCY: &str = "IDR";

pub const DEFAULT_SOURCE_URL: &str = "https://www.vip.co.id/";

/// `id` attribute of the rate table on the source page.
pub const RATE_TABLE_ID: &str = "rate-table";

/// Fewer rows than this means the page layout changed under us.
pub const MIN_CURRENCIES: usize = 3;

/// Offset the source page's timestamps are written in (WIB, UTC+7).
pub const SOURCE_UTC_OFFSET_SECS: i32 = 7 * 3600;

pub static DEFAULT_TIMEOUT: Duration = Duration::new(30, 0);

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Where and how to fetch the rate page.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl SourceConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SourceConfig::default()
            .with_url("http://localhost:8080/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.url, "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
