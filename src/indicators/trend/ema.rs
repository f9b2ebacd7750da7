//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// EMA for every point of `prices`; `None` until `span` points are available.
pub fn calculate_ema(prices: &[f64], span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; prices.len()];
    }
    math::ema_series(prices, span)
}
