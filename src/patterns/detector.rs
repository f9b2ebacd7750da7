//! Chart pattern detection over a chronological price series.

use crate::common::math;
use crate::common::window::rolling;
use crate::config::PatternConfig;
use crate::error::{EngineError, Result};
use crate::models::indicators::PriceSeries;
use crate::models::pattern::{PatternKind, PatternMatch};
use crate::patterns::peaks::{find_peaks, find_valleys};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    pub fn new(config: PatternConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Patterns holding at the end of the series, each tagged with the final
    /// point. Checks without enough history count as not matched.
    pub fn identify_patterns(&self, series: &PriceSeries) -> Result<Vec<PatternMatch>> {
        let last = *series.require_non_empty()?;
        let prices = series.prices();
        let mut found = Vec::new();

        for kind in PatternKind::ALL {
            match self
                .check(kind, &prices)
                .map_err(|e| e.for_symbol(&series.symbol))
            {
                Ok(true) => found.push(PatternMatch {
                    pattern_kind: kind,
                    timestamp: last.timestamp,
                    price: last.price,
                }),
                Ok(false) => {}
                Err(e) if e.is_recoverable() => {
                    debug!(
                        symbol = %series.symbol,
                        pattern = kind.as_str(),
                        error = %e,
                        "PatternDetector: skipping check"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            symbol = %series.symbol,
            count = found.len(),
            "PatternDetector: {} patterns found",
            found.len()
        );
        Ok(found)
    }

    /// Run one check over a series; errors carry the series' symbol.
    pub fn check_series(&self, kind: PatternKind, series: &PriceSeries) -> Result<bool> {
        self.check(kind, &series.prices())
            .map_err(|e| e.for_symbol(&series.symbol))
    }

    pub fn check(&self, kind: PatternKind, prices: &[f64]) -> Result<bool> {
        match kind {
            PatternKind::DoubleTop => self.check_double_top(prices),
            PatternKind::DoubleBottom => self.check_double_bottom(prices),
            PatternKind::HeadShoulders => self.check_head_shoulders(prices),
            PatternKind::Triangle => self.check_triangle(prices),
        }
    }

    /// Two most recent peaks within the relative threshold of each other.
    pub fn check_double_top(&self, prices: &[f64]) -> Result<bool> {
        let distance = self.config.double_distance;
        require_len("double_top", prices, distance)?;
        let peaks = find_peaks(prices, distance);
        Ok(self.last_two_match(prices, &peaks))
    }

    /// Two most recent valleys within the relative threshold of each other.
    pub fn check_double_bottom(&self, prices: &[f64]) -> Result<bool> {
        let distance = self.config.double_distance;
        require_len("double_bottom", prices, distance)?;
        let valleys = find_valleys(prices, distance);
        Ok(self.last_two_match(prices, &valleys))
    }

    /// Last three peaks: the middle one is the highest and the shoulders are
    /// within the relative threshold of each other.
    pub fn check_head_shoulders(&self, prices: &[f64]) -> Result<bool> {
        let distance = self.config.head_shoulders_distance;
        require_len("head_shoulders", prices, distance)?;
        let peaks = find_peaks(prices, distance);
        if peaks.len() < 3 {
            return Ok(false);
        }
        let tail = &peaks[peaks.len() - 3..];
        let (left, head, right) = (prices[tail[0]], prices[tail[1]], prices[tail[2]]);
        Ok(head > left && head > right && self.within_threshold(left, right))
    }

    /// Flat resistance and support: the slopes of the rolling max and rolling
    /// min over the trailing window are both below the flatness threshold.
    pub fn check_triangle(&self, prices: &[f64]) -> Result<bool> {
        let window = self.config.triangle_window;
        let span = self.config.triangle_rolling_span;
        require_len("triangle", prices, window + span - 1)?;

        let highs = rolling(prices, span, |w| w.max());
        let lows = rolling(prices, span, |w| w.min());
        let tail = prices.len() - window;

        let resistance: Option<Vec<f64>> = highs[tail..].iter().copied().collect();
        let support: Option<Vec<f64>> = lows[tail..].iter().copied().collect();
        let (Some(resistance), Some(support)) = (resistance, support) else {
            return Ok(false);
        };

        let (Some(high_slope), Some(low_slope)) =
            (math::linear_slope(&resistance), math::linear_slope(&support))
        else {
            return Ok(false);
        };

        let flat = self.config.flatness_threshold;
        Ok(high_slope.abs() < flat && low_slope.abs() < flat)
    }

    fn last_two_match(&self, prices: &[f64], extrema: &[usize]) -> bool {
        if extrema.len() < 2 {
            return false;
        }
        let first = prices[extrema[extrema.len() - 2]];
        let second = prices[extrema[extrema.len() - 1]];
        self.within_threshold(first, second)
    }

    /// |a - b| / |a| below the relative threshold. The absolute reference
    /// keeps the check symmetric under negation of the series.
    fn within_threshold(&self, reference: f64, other: f64) -> bool {
        if reference == 0.0 || !reference.is_finite() || !other.is_finite() {
            return false;
        }
        (reference - other).abs() / reference.abs() < self.config.relative_threshold
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            config: PatternConfig::default(),
        }
    }
}

fn require_len(context: &str, prices: &[f64], required: usize) -> Result<()> {
    if prices.len() < required {
        return Err(EngineError::insufficient(context, required, prices.len()));
    }
    Ok(())
}
