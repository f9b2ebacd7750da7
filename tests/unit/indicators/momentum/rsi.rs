//! Unit tests for RSI indicator

use crate::common::{falling, noisy, rising};
use coinsight::indicators::momentum::calculate_rsi;

#[test]
fn test_rsi_insufficient_data() {
    let rsi = calculate_rsi(&rising(14, 100.0, 1.0), 14);
    assert!(rsi.iter().all(Option::is_none));
}

#[test]
fn test_rsi_defined_from_period() {
    let rsi = calculate_rsi(&rising(15, 100.0, 1.0), 14);
    assert!(rsi[13].is_none());
    assert_eq!(rsi[14], Some(100.0));
}

#[test]
fn test_rsi_wilder_smoothing() {
    let rsi = calculate_rsi(&[1.0, 2.0, 1.0, 3.0], 2);
    assert_eq!(rsi[2], Some(50.0));
    assert!((rsi[3].unwrap() - 83.333_333_333).abs() < 1e-6);
}

#[test]
fn test_rsi_uptrend_is_100() {
    let rsi = calculate_rsi(&rising(30, 100.0, 0.5), 14);
    assert_eq!(rsi.last().copied().flatten(), Some(100.0));
}

#[test]
fn test_rsi_downtrend_is_0() {
    let rsi = calculate_rsi(&falling(30, 100.0, 0.5), 14);
    assert_eq!(rsi.last().copied().flatten(), Some(0.0));
}

#[test]
fn test_rsi_flat_series_is_100() {
    let rsi = calculate_rsi(&[50.0; 20], 14);
    assert_eq!(rsi[19], Some(100.0));
}

#[test]
fn test_rsi_bounded() {
    let rsi = calculate_rsi(&noisy(200, 100.0), 14);
    for value in rsi.into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value));
    }
}
