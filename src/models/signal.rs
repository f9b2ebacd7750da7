use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator a discrete signal is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorName {
    Macd,
    Rsi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    Overbought,
    Oversold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "indicator")]
    pub indicator_name: IndicatorName,
    #[serde(rename = "signal")]
    pub direction: SignalDirection,
}

impl Signal {
    pub fn new(indicator_name: IndicatorName, direction: SignalDirection) -> Self {
        Self {
            indicator_name,
            direction,
        }
    }
}

impl fmt::Display for IndicatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorName::Macd => write!(f, "MACD"),
            IndicatorName::Rsi => write!(f, "RSI"),
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
            SignalDirection::Overbought => "OVERBOUGHT",
            SignalDirection::Oversold => "OVERSOLD",
        };
        write!(f, "{}", s)
    }
}
