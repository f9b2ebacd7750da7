//! Unit tests for the signal generator

use chrono::Utc;
use coinsight::config::SignalConfig;
use coinsight::error::EngineError;
use coinsight::models::indicators::{IndicatorSnapshot, PricePoint};
use coinsight::models::signal::{IndicatorName, Signal, SignalDirection};
use coinsight::signals::SignalGenerator;

fn snapshot(macd: Option<f64>, signal: Option<f64>, rsi: Option<f64>) -> IndicatorSnapshot {
    IndicatorSnapshot::new(&PricePoint::new(Utc::now(), 100.0))
        .with_macd(macd, signal)
        .with_rsi(rsi)
}

#[test]
fn test_macd_buy_and_oversold() {
    let signals = SignalGenerator::default().generate_signals(&snapshot(Some(0.5), Some(0.3), Some(25.0)));
    assert_eq!(
        signals,
        vec![
            Signal::new(IndicatorName::Macd, SignalDirection::Buy),
            Signal::new(IndicatorName::Rsi, SignalDirection::Oversold),
        ]
    );
}

#[test]
fn test_macd_sell_and_overbought() {
    let signals = SignalGenerator::default().generate_signals(&snapshot(Some(-0.3), Some(-0.1), Some(75.0)));
    assert_eq!(
        signals,
        vec![
            Signal::new(IndicatorName::Macd, SignalDirection::Sell),
            Signal::new(IndicatorName::Rsi, SignalDirection::Overbought),
        ]
    );
}

#[test]
fn test_equal_macd_and_neutral_rsi() {
    let signals = SignalGenerator::default().generate_signals(&snapshot(Some(0.2), Some(0.2), Some(50.0)));
    assert!(signals.is_empty());
}

#[test]
fn test_rsi_boundaries_are_neutral() {
    let generator = SignalGenerator::default();
    assert!(generator.generate_signals(&snapshot(None, None, Some(30.0))).is_empty());
    assert!(generator.generate_signals(&snapshot(None, None, Some(70.0))).is_empty());
}

#[test]
fn test_undefined_indicators_emit_nothing() {
    let generator = SignalGenerator::default();
    assert!(generator.generate_signals(&snapshot(None, None, None)).is_empty());

    // MACD defined but signal line still warming up.
    let signals = generator.generate_signals(&snapshot(Some(1.0), None, Some(10.0)));
    assert_eq!(signals, vec![Signal::new(IndicatorName::Rsi, SignalDirection::Oversold)]);
}

#[test]
fn test_generate_latest_uses_last_snapshot() {
    let generator = SignalGenerator::default();
    let snapshots = vec![
        snapshot(Some(1.0), Some(0.0), Some(80.0)),
        snapshot(Some(-1.0), Some(0.0), Some(50.0)),
    ];
    assert_eq!(
        generator.generate_latest(&snapshots),
        vec![Signal::new(IndicatorName::Macd, SignalDirection::Sell)]
    );
    assert!(generator.generate_latest(&[]).is_empty());
}

#[test]
fn test_inverted_rsi_bands_rejected() {
    let inverted = SignalConfig {
        rsi_oversold: 90.0,
        rsi_overbought: 10.0,
    };
    assert!(matches!(
        SignalGenerator::new(inverted),
        Err(EngineError::InvalidConfiguration(_))
    ));

    let out_of_range = SignalConfig {
        rsi_oversold: -5.0,
        ..SignalConfig::default()
    };
    assert!(SignalGenerator::new(out_of_range).is_err());
    assert!(SignalGenerator::new(SignalConfig::default()).is_ok());
}

#[test]
fn test_custom_bands() {
    let generator = SignalGenerator::new(SignalConfig {
        rsi_oversold: 20.0,
        rsi_overbought: 80.0,
    })
    .unwrap();
    assert!(generator.generate_signals(&snapshot(None, None, Some(25.0))).is_empty());
    assert_eq!(
        generator.generate_signals(&snapshot(None, None, Some(85.0))),
        vec![Signal::new(IndicatorName::Rsi, SignalDirection::Overbought)]
    );
}
