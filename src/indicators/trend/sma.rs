//! SMA (Simple Moving Average) indicator

use crate::common::window::rolling;

/// Trailing SMA for every point; `None` during the warm-up window.
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; prices.len()];
    }
    rolling(prices, period, |w| Some(w.sum() / w.len() as f64))
}
