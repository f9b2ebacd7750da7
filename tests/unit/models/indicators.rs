//! Unit tests for price series construction

use chrono::{Duration, TimeZone, Utc};
use coinsight::error::EngineError;
use coinsight::models::indicators::{PricePoint, PriceSeries};

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_from_prices_spaces_timestamps() {
    let series = PriceSeries::from_prices("BTC", start(), Duration::minutes(5), &[1.0, 2.0, 3.0]).unwrap();
    let points = series.points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[2].timestamp - points[0].timestamp, Duration::minutes(10));
}

#[test]
fn test_from_prices_rejects_non_positive_step() {
    for step in [Duration::zero(), Duration::hours(-1)] {
        let result = PriceSeries::from_prices("BTC", start(), step, &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }
}

#[test]
fn test_new_rejects_duplicate_timestamps() {
    let points = vec![PricePoint::new(start(), 1.0), PricePoint::new(start(), 2.0)];
    assert!(matches!(
        PriceSeries::new("BTC", points),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn test_deserialize_checks_ordering() {
    let descending = r#"{
        "symbol": "BTC",
        "points": [
            {"timestamp": "2024-01-01T01:00:00Z", "price": 2.0},
            {"timestamp": "2024-01-01T00:00:00Z", "price": 1.0}
        ]
    }"#;
    assert!(serde_json::from_str::<PriceSeries>(descending).is_err());

    let ascending = r#"{
        "symbol": "BTC",
        "points": [
            {"timestamp": "2024-01-01T00:00:00Z", "price": 1.0},
            {"timestamp": "2024-01-01T01:00:00Z", "price": 2.0}
        ]
    }"#;
    let series: PriceSeries = serde_json::from_str(ascending).unwrap();
    assert_eq!(series.prices(), vec![1.0, 2.0]);
}

#[test]
fn test_round_trips_through_json() {
    let series = PriceSeries::from_prices("ETH", start(), Duration::hours(1), &[10.0, 11.0]).unwrap();
    let json = serde_json::to_string(&series).unwrap();
    assert_eq!(serde_json::from_str::<PriceSeries>(&json).unwrap(), series);
}
