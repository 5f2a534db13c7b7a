//! Recovery of the page's "last updated" stamp.
//!
//! The source prints something like `</table><br><a>15-Januari 10:30</a>`
//! right after the rate table: day, local month name, time, and no year.
//! [`crate::extract`] finds that link; this module reads its text. The year
//! is picked so that the result lands as close as possible to the current
//! time.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::SOURCE_UTC_OFFSET_SECS;

static STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})-(\p{L}+)\s+(\d{1,2}):(\d{2})$").unwrap());

// Indonesian first, English as fallback.
const MONTHS: [[&str; 2]; 12] = [
    ["januari", "january"],
    ["februari", "february"],
    ["maret", "march"],
    ["april", "april"],
    ["mei", "may"],
    ["juni", "june"],
    ["juli", "july"],
    ["agustus", "august"],
    ["september", "september"],
    ["oktober", "october"],
    ["november", "november"],
    ["desember", "december"],
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("no update stamp after the rate table")]
    NotFound,

    #[error("'{0}' does not look like DD-Month HH:MM")]
    Unrecognized(String),

    #[error("unrecognized month name '{0}'")]
    UnknownMonth(String),

    #[error("'{0}' is not a valid date in the current or previous year")]
    InvalidDate(String),
}

/// Maps a full or three-letter month name to 1..=12, case-insensitively.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    if name.chars().count() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|names| {
            names
                .iter()
                .any(|full| *full == name || (name.len() == 3 && full.starts_with(&name)))
        })
        .map(|idx| idx as u32 + 1)
}

/// Reads a `DD-Month HH:MM` stamp and resolves it relative to `now`.
pub fn recover(text: &str, now: DateTime<Utc>) -> Result<DateTime<FixedOffset>, TimestampError> {
    let text = text.trim();
    let caps = STAMP
        .captures(text)
        .ok_or_else(|| TimestampError::Unrecognized(text.to_string()))?;
    let raw = format!("{}-{} {}:{}", &caps[1], &caps[2], &caps[3], &caps[4]);

    let month = month_number(&caps[2]).ok_or_else(|| TimestampError::UnknownMonth(caps[2].to_string()))?;
    let invalid = || TimestampError::InvalidDate(raw.clone());
    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let hour: u32 = caps[3].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[4].parse().map_err(|_| invalid())?;

    let offset = FixedOffset::east_opt(SOURCE_UTC_OFFSET_SECS).ok_or_else(invalid)?;
    let year = now.with_timezone(&offset).year();

    [year, year - 1]
        .into_iter()
        .filter_map(|y| {
            NaiveDate::from_ymd_opt(y, month, day)?
                .and_hms_opt(hour, minute, 0)?
                .and_local_timezone(offset)
                .single()
        })
        .min_by_key(|candidate| (candidate.with_timezone(&Utc) - now).num_seconds().abs())
        .ok_or_else(invalid)
}
