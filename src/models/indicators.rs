use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Chronological prices for one symbol. Timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

/// Wire shape of [`PriceSeries`]; converted through [`PriceSeries::new`].
#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawSeries> for PriceSeries {
    type Error = EngineError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        PriceSeries::new(raw.symbol, raw.points)
    }
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate timestamps.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let symbol = symbol.into();
        if let Some(pos) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(EngineError::InvalidInput(format!(
                "{}: timestamps not strictly increasing at index {}",
                symbol,
                pos + 1
            )));
        }
        Ok(Self { symbol, points })
    }

    /// Build a series from raw prices sampled at a fixed interval.
    /// The step must be positive.
    pub fn from_prices(
        symbol: impl Into<String>,
        start: DateTime<Utc>,
        step: chrono::Duration,
        prices: &[f64],
    ) -> Result<Self> {
        let symbol = symbol.into();
        if step <= chrono::Duration::zero() {
            return Err(EngineError::InvalidInput(format!(
                "{}: sampling step must be positive, got {}",
                symbol, step
            )));
        }
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(start + step * i as i32, price))
            .collect();
        Ok(Self { symbol, points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Fails with `InvalidInput` on an empty series.
    pub fn require_non_empty(&self) -> Result<&PricePoint> {
        self.points.last().ok_or_else(|| {
            EngineError::InvalidInput(format!("{}: price series is empty", self.symbol))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaValue {
    pub period: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Indicator values at one point of a series. `None` means undefined
/// (still inside that indicator's warm-up window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_histogram: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_mid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_low: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sma: Vec<SmaValue>,
}

impl IndicatorSnapshot {
    pub fn new(point: &PricePoint) -> Self {
        Self {
            timestamp: point.timestamp,
            price: point.price,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
            rsi: None,
            bb_high: None,
            bb_mid: None,
            bb_low: None,
            sma: Vec::new(),
        }
    }

    pub fn with_macd(mut self, macd: Option<f64>, signal: Option<f64>) -> Self {
        self.macd = macd;
        self.macd_signal = signal;
        self.macd_histogram = match (macd, signal) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        };
        self
    }

    pub fn with_rsi(mut self, rsi: Option<f64>) -> Self {
        self.rsi = rsi;
        self
    }

    pub fn with_bollinger(mut self, high: Option<f64>, mid: Option<f64>, low: Option<f64>) -> Self {
        self.bb_high = high;
        self.bb_mid = mid;
        self.bb_low = low;
        self
    }

    pub fn sma(&self, period: usize) -> Option<f64> {
        self.sma
            .iter()
            .find(|s| s.period == period)
            .and_then(|s| s.value)
    }
}
