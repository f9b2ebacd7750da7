//! Unit tests for regime clustering

use crate::common::{noisy, series};
use coinsight::config::ClusterConfig;
use coinsight::error::EngineError;
use coinsight::patterns::RegimeClusterer;

#[test]
fn test_every_row_assigned_once() {
    let clusterer = RegimeClusterer::default();
    let input = series("BTC", &noisy(120, 100.0));
    let rows = clusterer.extract_features(&input.prices()).len();
    assert_eq!(rows, 113);

    let profiles = clusterer.cluster(&input).unwrap();
    assert_eq!(profiles.len(), 5);
    assert_eq!(profiles.iter().map(|p| p.member_count).sum::<usize>(), rows);
    for (id, profile) in profiles.iter().enumerate() {
        assert_eq!(profile.cluster_id, id);
    }
}

#[test]
fn test_cluster_with_custom_k() {
    let clusterer = RegimeClusterer::default();
    let profiles = clusterer.cluster_with(&series("ETH", &noisy(60, 2000.0)), 2).unwrap();
    assert_eq!(profiles.len(), 2);
}

#[test]
fn test_fewer_rows_than_clusters() {
    let clusterer = RegimeClusterer::default();
    let result = clusterer.cluster(&series("BTC", &noisy(8, 100.0)));
    assert!(matches!(
        result,
        Err(EngineError::InsufficientData { required: 5, available: 1, .. })
    ));
}

#[test]
fn test_zero_clusters_rejected() {
    let clusterer = RegimeClusterer::default();
    let result = clusterer.cluster_with(&series("BTC", &noisy(60, 100.0)), 0);
    assert!(matches!(result, Err(EngineError::InvalidInput(_))));
}

#[test]
fn test_deterministic_for_fixed_seed() {
    let clusterer = RegimeClusterer::default();
    let input = series("BTC", &noisy(150, 100.0));
    assert_eq!(clusterer.cluster(&input).unwrap(), clusterer.cluster(&input).unwrap());
}

#[test]
fn test_non_finite_rows_dropped() {
    let clusterer = RegimeClusterer::default();
    let mut prices = noisy(30, 100.0);
    prices[10] = 0.0;
    let rows = clusterer.extract_features(&prices);
    assert!(rows.len() < 23);
    assert!(rows
        .iter()
        .all(|r| r.daily_return.is_finite() && r.weekly_return.is_finite() && r.volatility.is_finite()));
}

#[test]
fn test_invalid_config_rejected() {
    let config = ClusterConfig {
        rolling_window: 1,
        ..ClusterConfig::default()
    };
    assert!(matches!(
        RegimeClusterer::new(config),
        Err(EngineError::InvalidConfiguration(_))
    ));
}
