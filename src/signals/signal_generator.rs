use crate::config::SignalConfig;
use crate::error::Result;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{IndicatorName, Signal, SignalDirection};
use tracing::debug;

/// Rule-based signals over the most recent indicator snapshot.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    /// Fails when the RSI bands are out of range or inverted.
    pub fn new(config: SignalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Signals for the latest snapshot. Undefined indicators never produce
    /// a signal.
    pub fn generate_signals(&self, snapshot: &IndicatorSnapshot) -> Vec<Signal> {
        let mut signals = Vec::new();

        match self.analyze_macd(snapshot.macd, snapshot.macd_signal) {
            MacdAnalysis::Bullish => signals.push(Signal::new(IndicatorName::Macd, SignalDirection::Buy)),
            MacdAnalysis::Bearish => signals.push(Signal::new(IndicatorName::Macd, SignalDirection::Sell)),
            MacdAnalysis::Neutral | MacdAnalysis::Undefined => {}
        }

        match self.analyze_rsi(snapshot.rsi) {
            RsiAnalysis::Oversold => signals.push(Signal::new(IndicatorName::Rsi, SignalDirection::Oversold)),
            RsiAnalysis::Overbought => {
                signals.push(Signal::new(IndicatorName::Rsi, SignalDirection::Overbought))
            }
            RsiAnalysis::Neutral | RsiAnalysis::Undefined => {}
        }

        debug!(
            timestamp = %snapshot.timestamp,
            count = signals.len(),
            "SignalGenerator: generated {} signals",
            signals.len()
        );
        signals
    }

    /// Signals for the final snapshot of a computed series.
    pub fn generate_latest(&self, snapshots: &[IndicatorSnapshot]) -> Vec<Signal> {
        snapshots
            .last()
            .map(|s| self.generate_signals(s))
            .unwrap_or_default()
    }

    fn analyze_macd(&self, macd: Option<f64>, signal: Option<f64>) -> MacdAnalysis {
        let (Some(macd), Some(signal)) = (macd, signal) else {
            return MacdAnalysis::Undefined;
        };
        if macd > signal {
            MacdAnalysis::Bullish
        } else if macd < signal {
            MacdAnalysis::Bearish
        } else {
            MacdAnalysis::Neutral
        }
    }

    fn analyze_rsi(&self, rsi: Option<f64>) -> RsiAnalysis {
        let Some(rsi) = rsi else {
            return RsiAnalysis::Undefined;
        };
        if rsi < self.config.rsi_oversold {
            RsiAnalysis::Oversold
        } else if rsi > self.config.rsi_overbought {
            RsiAnalysis::Overbought
        } else {
            RsiAnalysis::Neutral
        }
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self {
            config: SignalConfig::default(),
        }
    }
}

enum MacdAnalysis {
    Bullish,
    Bearish,
    Neutral,
    Undefined,
}

enum RsiAnalysis {
    Oversold,
    Overbought,
    Neutral,
    Undefined,
}
