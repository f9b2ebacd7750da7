//! Bollinger Bands indicator

use crate::common::window::RollingWindow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands for every point
///
/// Middle Band = SMA(window)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn calculate_bollinger_bands(
    prices: &[f64],
    window: usize,
    std_dev: f64,
) -> Vec<Option<BollingerBand>> {
    if window < 2 {
        return vec![None; prices.len()];
    }

    let mut win = RollingWindow::new(window);
    prices
        .iter()
        .map(|&price| {
            win.push(price);
            if !win.is_full() {
                return None;
            }
            let middle = win.sum() / window as f64;
            let std = win.sample_std()?;
            Some(BollingerBand {
                upper: middle + std_dev * std,
                middle,
                lower: middle - std_dev * std,
            })
        })
        .collect()
}
