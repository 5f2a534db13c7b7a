use thiserror::Error;

/// Why a rate table could not be produced.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Transport failure or a non-success status. `status` is `None` when
    /// no response was received at all.
    #[error("Fetch error: {message}")]
    Fetch { status: Option<u16>, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        ExtractionError::Fetch {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Unsupported target currency: {0}")]
    UnsupportedTarget(String),

    #[error("Rate unavailable: {0}")]
    RateUnavailable(#[source] ExtractionError),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_keeps_status() {
        let err = ExtractionError::Fetch {
            status: Some(503),
            message: "HTTP status 503 Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Fetch error: HTTP status 503 Service Unavailable");
        assert!(matches!(err, ExtractionError::Fetch { status: Some(503), .. }));
    }

    #[test]
    fn rate_unavailable_exposes_source() {
        use std::error::Error as _;

        let err = ConversionError::RateUnavailable(ExtractionError::Validation(
            "too few currencies found".to_string(),
        ));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("too few currencies found"));
    }
}
