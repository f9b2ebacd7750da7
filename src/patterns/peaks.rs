//! Local extrema detection with a minimum spacing constraint.

/// Indices of local maxima that are at least `distance` samples apart.
///
/// A sample is a local maximum when it is strictly above its left neighbour
/// and strictly above the first differing sample to its right; flat tops
/// report their middle sample. Then, from the highest peak down, every
/// remaining peak closer than `distance` to a kept peak is discarded.
pub fn find_peaks(values: &[f64], distance: usize) -> Vec<usize> {
    let peaks = local_maxima(values);
    if distance <= 1 || peaks.len() < 2 {
        return peaks;
    }
    select_by_distance(values, &peaks, distance)
}

/// Indices of local minima, found as maxima of the negated series.
pub fn find_valleys(values: &[f64], distance: usize) -> Vec<usize> {
    let negated: Vec<f64> = values.iter().map(|v| -v).collect();
    find_peaks(&negated, distance)
}

fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    let n = values.len();
    if n < 3 {
        return peaks;
    }

    let mut i = 1;
    let last = n - 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let right_edge = ahead - 1;
                peaks.push((i + right_edge) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

fn select_by_distance(values: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    let mut keep = vec![true; peaks.len()];

    // Positions into `peaks`, highest value last. Ties keep index order.
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| values[peaks[a]].total_cmp(&values[peaks[b]]));

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, kept)| kept.then_some(p))
        .collect()
}
