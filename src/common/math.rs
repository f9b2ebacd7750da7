//! Series math primitives.

/// Smoothing factor for an EMA of the given span.
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// One step of the EMA recurrence.
pub fn ema_from_previous(value: f64, previous: f64, span: usize) -> f64 {
    let alpha = ema_alpha(span);
    alpha * value + (1.0 - alpha) * previous
}

/// EMA over the whole series, seeded with the first value.
///
/// Values before index `span - 1` are `None` (warm-up).
pub fn ema_series(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut current: Option<f64> = None;
    for (i, &value) in values.iter().enumerate() {
        let next = match current {
            Some(prev) => ema_from_previous(value, prev, span),
            None => value,
        };
        current = Some(next);
        out.push(if i + 1 >= span { Some(next) } else { None });
    }
    out
}

/// Simple moving average of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let var = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Period-over-period fractional change. Output has `len - 1` entries;
/// a zero previous value yields a non-finite entry.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Least-squares slope of `ys` against x = 0, 1, 2, ...
pub fn linear_slope(ys: &[f64]) -> Option<f64> {
    let n = ys.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(ys)?;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Squared euclidean distance.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
