//! Extraction and conversion against a saved copy of the rate page.

use approx::assert_relative_eq;
use chrono::{FixedOffset, TimeZone, Utc};
use kurs::{
    extract, extract_at, CurrencyService, ExtractionError, PageSource, RateClient, RateKind,
    SourceConfig,
};

const PAGE: &str = include_str!("fixtures/rates.html");

fn offline_client() -> RateClient {
    RateClient::new(SourceConfig::default().with_url("http://127.0.0.1:9/")).unwrap()
}

#[test]
fn extracts_only_currency_rows() {
    let now = Utc.with_ymd_and_hms(2024, 1, 20, 5, 0, 0).unwrap();
    let result = extract_at(PAGE, now).unwrap();

    assert_eq!(result.currencies.codes(), vec!["AUD", "EUR", "JPY", "SGD", "USD"]);

    let usd = result.currencies.get("USD").unwrap();
    assert_relative_eq!(usd.buy(), 14000.00);
    assert_relative_eq!(usd.sell(), 14200.50);

    let eur = result.currencies.get("EUR").unwrap();
    assert_relative_eq!(eur.buy(), 15125.00);
    assert_relative_eq!(eur.sell(), 15385.00);
}

#[test]
fn recovers_update_time_in_wib() {
    let now = Utc.with_ymd_and_hms(2024, 1, 20, 5, 0, 0).unwrap();
    let result = extract_at(PAGE, now).unwrap();

    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    assert_eq!(
        result.updated_at,
        Some(wib.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
    );
}

#[test]
fn missing_or_unreadable_stamp_does_not_fail() {
    let without = PAGE.replace("<br><a href=\"#\">15-Januari 10:30</a>", "");
    assert!(extract(&without).unwrap().updated_at.is_none());

    let unknown_month = PAGE.replace("15-Januari", "15-Thermidor");
    let result = extract(&unknown_month).unwrap();
    assert!(result.updated_at.is_none());
    assert_eq!(result.currencies.len(), 5);
}

#[test]
fn extraction_is_repeatable() {
    let now = Utc.with_ymd_and_hms(2024, 1, 20, 5, 0, 0).unwrap();

    assert_eq!(extract_at(PAGE, now).unwrap(), extract_at(PAGE, now).unwrap());
}

#[test]
fn redesigned_page_is_rejected() {
    let renamed = PAGE.replace("id=\"rate-table\"", "id=\"rates\"");
    assert!(matches!(extract(&renamed), Err(ExtractionError::Parse(_))));

    let start = PAGE.find("<tr><td>EUR</td>").unwrap();
    let end = PAGE.find("<tr><td colspan=\"3\"><small>").unwrap();
    let truncated = format!("{}{}", &PAGE[..start], &PAGE[end..]);
    match extract(&truncated) {
        Err(ExtractionError::Validation(msg)) => assert!(msg.contains("too few currencies")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn converts_from_a_provided_page() {
    let client = offline_client();
    let result = client.extract(PageSource::Provided(PAGE.to_string())).await.unwrap();
    let mut service = CurrencyService::with_result(client, result);

    let idr = service.convert(100.0, "USD", "IDR", RateKind::Sell).await.unwrap();
    assert_relative_eq!(idr.unwrap(), 1420050.0);

    let idr = service.convert(1000.0, "jpy", "IDR", RateKind::Buy).await.unwrap();
    assert_relative_eq!(idr.unwrap(), 95100.0);

    assert_eq!(service.convert(100.0, "XYZ", "IDR", RateKind::Sell).await.unwrap(), None);
}

#[tokio::test]
async fn get_currencies_envelope_from_cache() {
    let mut service = CurrencyService::with_page(offline_client(), PAGE.to_string())
        .await
        .unwrap();

    let response = service.get_currencies().await;
    assert!(response.is_success());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["currencies"]["SGD"]["buy"], 10400.0);
    assert!(json["data"]["mtime"].is_string());
}
