//! Turns the raw rate page into an [`ExtractionResult`].

use chrono::{DateTime, Utc};
use log::{debug, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use crate::config::{MIN_CURRENCIES, RATE_TABLE_ID};
use crate::error::{ExtractionError, Result};
use crate::models::{CurrencyRate, CurrencyTable, ExtractionResult};
use crate::number::parse_localized;
use crate::timestamp::{self, TimestampError};

static RATE_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("table#{}", RATE_TABLE_ID)).unwrap());

/// Extracts rates and the update stamp, resolving the stamp against the
/// wall clock.
pub fn extract(page: &str) -> Result<ExtractionResult> {
    extract_at(page, Utc::now())
}

/// Same as [`extract`] with an explicit "now" for the year guess.
pub fn extract_at(page: &str, now: DateTime<Utc>) -> Result<ExtractionResult> {
    let document = Html::parse_document(page);
    let table = rate_table(&document)?;

    let currencies = read_rows(table)?;
    if currencies.len() < MIN_CURRENCIES {
        return Err(ExtractionError::Validation(format!(
            "too few currencies found ({} < {})",
            currencies.len(),
            MIN_CURRENCIES
        )));
    }

    let stamp = stamp_after(table).ok_or(TimestampError::NotFound);
    let updated_at = match stamp.and_then(|text| timestamp::recover(&text, now)) {
        Ok(stamp) => Some(stamp),
        Err(e) => {
            warn!("Could not determine rate update time: {}", e);
            None
        }
    };

    debug!("Extracted {} currencies, updated at {:?}", currencies.len(), updated_at);
    Ok(ExtractionResult { currencies, updated_at })
}

/// Collects every row of the rate table's body whose first cell is a
/// currency code. Later rows win on duplicate codes.
pub fn parse_table(page: &str) -> Result<CurrencyTable> {
    let document = Html::parse_document(page);
    read_rows(rate_table(&document)?)
}

/// Exactly three upper-case ASCII letters.
pub fn is_currency_code(text: &str) -> bool {
    text.len() == 3 && text.bytes().all(|b| b.is_ascii_uppercase())
}

fn rate_table(document: &Html) -> Result<ElementRef<'_>> {
    document
        .select(&RATE_TABLE)
        .next()
        .ok_or_else(|| ExtractionError::Parse(format!("rate table '#{}' not found", RATE_TABLE_ID)))
}

fn read_rows(table: ElementRef<'_>) -> Result<CurrencyTable> {
    let body = child_elements(table, &["tbody"])
        .next()
        .ok_or_else(|| ExtractionError::Parse(format!("rate table '#{}' has no body", RATE_TABLE_ID)))?;

    let mut currencies = CurrencyTable::new();
    for row in child_elements(body, &["tr"]) {
        let cells: Vec<String> = child_elements(row, &["td", "th"]).map(cell_text).collect();
        let Some(code) = cells.first().filter(|c| is_currency_code(c)) else {
            continue;
        };
        if cells.len() < 3 {
            warn!("Skipping {}: row has {} cells, expected at least 3", code, cells.len());
            continue;
        }

        let (Some(buy), Some(sell)) = (parse_localized(&cells[1]), parse_localized(&cells[2])) else {
            warn!("Skipping {}: unreadable rates '{}' / '{}'", code, cells[1], cells[2]);
            continue;
        };
        if currencies.upsert(code, CurrencyRate::new(buy, sell)).is_some() {
            warn!("Currency {} listed more than once, keeping the last row", code);
        }
    }

    Ok(currencies)
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    names: &'static [&'static str],
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| names.iter().any(|name| *name == el.value().name()))
}

/// Text of the `<a>` right after the table, allowing only whitespace,
/// comments and `<br>` in between.
fn stamp_after(table: ElementRef<'_>) -> Option<String> {
    for node in table.next_siblings() {
        match node.value() {
            Node::Text(text) if text.trim().is_empty() => continue,
            Node::Comment(_) => continue,
            Node::Element(el) if el.name() == "br" => continue,
            Node::Element(el) if el.name() == "a" => return ElementRef::wrap(node).map(cell_text),
            _ => return None,
        }
    }
    None
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
