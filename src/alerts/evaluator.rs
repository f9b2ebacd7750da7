//! Threshold alerts on price and volume moves between two snapshots.

use crate::config::AlertConfig;
use crate::error::Result;
use crate::models::alert::{AlertEvent, AlertKind, MarketSnapshot};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    config: AlertConfig,
}

impl AlertEvaluator {
    pub fn new(config: AlertConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Price alerts for symbols whose move reaches the price threshold.
    /// Symbols without a positive prior price are skipped.
    pub fn check_price_alerts(
        &self,
        current: &[MarketSnapshot],
        prior: &HashMap<String, MarketSnapshot>,
    ) -> Vec<AlertEvent> {
        current
            .iter()
            .filter_map(|snapshot| {
                let previous = prior.get(&snapshot.symbol)?.price;
                self.evaluate(
                    AlertKind::PriceAlert,
                    &snapshot.symbol,
                    snapshot.price,
                    previous,
                    self.config.price_change_threshold,
                )
            })
            .collect()
    }

    /// Volume alerts, same comparison as prices over `volume_24h`.
    pub fn check_volume_alerts(
        &self,
        current: &[MarketSnapshot],
        prior: &HashMap<String, MarketSnapshot>,
    ) -> Vec<AlertEvent> {
        current
            .iter()
            .filter_map(|snapshot| {
                let now = snapshot.volume_24h?;
                let previous = prior.get(&snapshot.symbol)?.volume_24h?;
                self.evaluate(
                    AlertKind::VolumeAlert,
                    &snapshot.symbol,
                    now,
                    previous,
                    self.config.volume_change_threshold,
                )
            })
            .collect()
    }

    /// Price alerts followed by volume alerts.
    pub fn check_alerts(
        &self,
        current: &[MarketSnapshot],
        prior: &HashMap<String, MarketSnapshot>,
    ) -> Vec<AlertEvent> {
        let mut alerts = self.check_price_alerts(current, prior);
        alerts.extend(self.check_volume_alerts(current, prior));
        alerts
    }

    fn evaluate(
        &self,
        kind: AlertKind,
        symbol: &str,
        current: f64,
        previous: f64,
        threshold: f64,
    ) -> Option<AlertEvent> {
        let change = percent_change(current, previous)?;
        if change.abs() < threshold {
            return None;
        }
        debug!(
            symbol = %symbol,
            kind = kind.as_str(),
            change = change,
            "AlertEvaluator: threshold {} reached",
            threshold
        );
        let metric = match kind {
            AlertKind::PriceAlert => "price",
            AlertKind::VolumeAlert => "volume",
        };
        Some(AlertEvent {
            kind,
            symbol: symbol.to_string(),
            change_percent: change,
            message: format!("{} {} changed by {:.2}%", symbol, metric, change),
        })
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self {
            config: AlertConfig::default(),
        }
    }
}

/// Percent change from `previous` to `current`; `None` when the previous
/// value is not positive or either value is not finite.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous <= 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) * 100.0 / previous)
}
