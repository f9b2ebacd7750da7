//! Unit tests for the alert evaluator

use coinsight::alerts::{percent_change, AlertEvaluator};
use coinsight::config::AlertConfig;
use coinsight::error::EngineError;
use coinsight::models::alert::{AlertKind, MarketSnapshot};
use std::collections::HashMap;

fn prior(snapshots: &[MarketSnapshot]) -> HashMap<String, MarketSnapshot> {
    snapshots
        .iter()
        .map(|s| (s.symbol.clone(), s.clone()))
        .collect()
}

#[test]
fn test_price_alert_message() {
    let evaluator = AlertEvaluator::default();
    let alerts = evaluator.check_price_alerts(
        &[MarketSnapshot::new("BTC", 110.0)],
        &prior(&[MarketSnapshot::new("BTC", 100.0)]),
    );
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::PriceAlert);
    assert_eq!(alerts[0].change_percent, 10.0);
    assert_eq!(alerts[0].message, "BTC price changed by 10.00%");
}

#[test]
fn test_drop_triggers_negative_change() {
    let evaluator = AlertEvaluator::default();
    let alerts = evaluator.check_price_alerts(
        &[MarketSnapshot::new("ETH", 90.0)],
        &prior(&[MarketSnapshot::new("ETH", 100.0)]),
    );
    assert_eq!(alerts[0].change_percent, -10.0);
    assert_eq!(alerts[0].message, "ETH price changed by -10.00%");
}

#[test]
fn test_threshold_is_inclusive() {
    let evaluator = AlertEvaluator::default();
    let prev = prior(&[MarketSnapshot::new("SOL", 100.0)]);
    assert_eq!(
        evaluator.check_price_alerts(&[MarketSnapshot::new("SOL", 105.0)], &prev).len(),
        1
    );
    assert!(evaluator
        .check_price_alerts(&[MarketSnapshot::new("SOL", 104.0)], &prev)
        .is_empty());
}

#[test]
fn test_missing_or_zero_prior_skipped() {
    let evaluator = AlertEvaluator::default();
    let current = [MarketSnapshot::new("BTC", 150.0), MarketSnapshot::new("NEW", 1.0)];
    let alerts = evaluator.check_price_alerts(&current, &prior(&[MarketSnapshot::new("BTC", 0.0)]));
    assert!(alerts.is_empty());
}

#[test]
fn test_volume_alerts() {
    let evaluator = AlertEvaluator::default();
    let prev = prior(&[
        MarketSnapshot::new("BTC", 100.0).with_volume(1_000.0),
        MarketSnapshot::new("ETH", 100.0).with_volume(1_000.0),
        MarketSnapshot::new("SOL", 100.0),
    ]);
    let current = [
        MarketSnapshot::new("BTC", 100.0).with_volume(1_250.0),
        MarketSnapshot::new("ETH", 100.0).with_volume(1_100.0),
        MarketSnapshot::new("SOL", 100.0).with_volume(9_000.0),
    ];

    let alerts = evaluator.check_volume_alerts(&current, &prev);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::VolumeAlert);
    assert_eq!(alerts[0].symbol, "BTC");
    assert_eq!(alerts[0].message, "BTC volume changed by 25.00%");
}

#[test]
fn test_check_alerts_price_then_volume() {
    let evaluator = AlertEvaluator::default();
    let prev = prior(&[MarketSnapshot::new("BTC", 100.0).with_volume(1_000.0)]);
    let current = [MarketSnapshot::new("BTC", 120.0).with_volume(2_000.0)];
    let kinds: Vec<AlertKind> = evaluator
        .check_alerts(&current, &prev)
        .iter()
        .map(|a| a.kind)
        .collect();
    assert_eq!(kinds, vec![AlertKind::PriceAlert, AlertKind::VolumeAlert]);
}

#[test]
fn test_percent_change() {
    assert_eq!(percent_change(110.0, 100.0), Some(10.0));
    assert_eq!(percent_change(1.0, 0.0), None);
    assert_eq!(percent_change(1.0, -5.0), None);
    assert_eq!(percent_change(f64::NAN, 5.0), None);
}

#[test]
fn test_non_positive_threshold_rejected() {
    let config = AlertConfig {
        price_change_threshold: 0.0,
        ..AlertConfig::default()
    };
    assert!(matches!(
        AlertEvaluator::new(config),
        Err(EngineError::InvalidConfiguration(_))
    ));
}
