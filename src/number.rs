//! Parsing of rate cells written with English digit grouping
//! (`14,200.50`): comma thousands separator, dot decimal separator.

use once_cell::sync::Lazy;
use regex::Regex;

static GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").unwrap());

/// Parses a non-negative localized number. Returns `None` for anything that
/// is not a well-formed grouped or plain decimal.
pub fn parse_localized(text: &str) -> Option<f64> {
    let text = text.trim();
    if !GROUPED.is_match(text) {
        return None;
    }
    text.replace(',', "").parse::<f64>().ok()
}
