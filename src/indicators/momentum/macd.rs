//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::trend::calculate_ema;

/// MACD and signal line aligned with the input prices.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow), defined once `slow` points exist.
/// Signal = EMA(signal) of the defined MACD values, seeded with the first
/// of them, so it is defined from point `slow + signal - 1`.
pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = calculate_ema(prices, fast);
    let slow_ema = calculate_ema(prices, slow);

    let macd: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let mut signal_line = vec![None; prices.len()];
    let mut previous: Option<f64> = None;
    let mut seen = 0usize;
    for (i, value) in macd.iter().enumerate() {
        let Some(value) = value else { continue };
        let next = match previous {
            Some(prev) => math::ema_from_previous(*value, prev, signal),
            None => *value,
        };
        previous = Some(next);
        seen += 1;
        if seen >= signal {
            signal_line[i] = Some(next);
        }
    }

    MacdSeries {
        macd,
        signal: signal_line,
    }
}
