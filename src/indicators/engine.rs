//! Indicator engine: one snapshot per point of a price series.

use crate::config::IndicatorConfig;
use crate::error::{EngineError, Result};
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::calculate_sma;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::{IndicatorSnapshot, PriceSeries, SmaValue};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Points needed before MACD, signal, RSI and Bollinger are all defined.
    pub fn warmup_len(&self) -> usize {
        let c = &self.config;
        (c.macd_slow + c.macd_signal - 1)
            .max(c.rsi_period + 1)
            .max(c.bollinger_window)
    }

    /// Compute a snapshot for every point. Short series yield snapshots with
    /// undefined values; only an empty series is rejected.
    pub fn compute(&self, series: &PriceSeries) -> Result<Vec<IndicatorSnapshot>> {
        series.require_non_empty()?;
        let c = &self.config;
        let prices = series.prices();

        if prices.len() < self.warmup_len() {
            debug!(
                symbol = %series.symbol,
                points = prices.len(),
                warmup = self.warmup_len(),
                "IndicatorEngine: series inside warm-up window, partial results"
            );
        }

        let macd = calculate_macd(&prices, c.macd_fast, c.macd_slow, c.macd_signal);
        let rsi = calculate_rsi(&prices, c.rsi_period);
        let bands = calculate_bollinger_bands(&prices, c.bollinger_window, c.bollinger_std_dev);
        let smas: Vec<(usize, Vec<Option<f64>>)> = c
            .sma_periods
            .iter()
            .map(|&period| (period, calculate_sma(&prices, period)))
            .collect();

        let snapshots = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let band = bands[i];
                let mut snapshot = IndicatorSnapshot::new(point)
                    .with_macd(macd.macd[i], macd.signal[i])
                    .with_rsi(rsi[i])
                    .with_bollinger(
                        band.map(|b| b.upper),
                        band.map(|b| b.middle),
                        band.map(|b| b.lower),
                    );
                snapshot.sma = smas
                    .iter()
                    .map(|(period, values)| SmaValue {
                        period: *period,
                        value: values[i],
                    })
                    .collect();
                snapshot
            })
            .collect();

        Ok(snapshots)
    }

    /// Snapshot for the final point of the series.
    pub fn latest(&self, series: &PriceSeries) -> Result<IndicatorSnapshot> {
        self.compute(series)?
            .pop()
            .ok_or_else(|| EngineError::InvalidInput(format!("{}: price series is empty", series.symbol)))
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }
}
