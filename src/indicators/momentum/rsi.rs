//! RSI (Relative Strength Index) indicator

/// Calculate RSI with Wilder smoothing for every point.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
/// The averages are seeded with the mean of the first `period` changes and
/// then smoothed as `avg = (prev * (period - 1) + current) / period`.
/// Defined from index `period`; RSI is 100 whenever the average loss is 0.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; prices.len()];
    if period == 0 || prices.len() < period + 1 {
        return out;
    }

    let p = period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..prices.len() {
        let change = prices[i] - prices[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i <= period {
            avg_gain += gain / p;
            avg_loss += loss / p;
            if i < period {
                continue;
            }
        } else {
            avg_gain = (avg_gain * (p - 1.0) + gain) / p;
            avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        }

        out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}
