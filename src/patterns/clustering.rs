//! Unsupervised clustering of return/volatility regimes.

use crate::common::math;
use crate::common::window::RollingWindow;
use crate::config::ClusterConfig;
use crate::error::{EngineError, Result};
use crate::models::indicators::PriceSeries;
use crate::models::pattern::ClusterProfile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// One row of clustering features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeFeatures {
    pub daily_return: f64,
    pub weekly_return: f64,
    pub volatility: f64,
}

impl RegimeFeatures {
    fn as_array(&self) -> [f64; 3] {
        [self.daily_return, self.weekly_return, self.volatility]
    }
}

#[derive(Debug, Clone)]
pub struct RegimeClusterer {
    config: ClusterConfig,
}

impl RegimeClusterer {
    pub fn new(config: ClusterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns, rolling return sum and rolling return volatility per point.
    /// Rows whose rolling values are undefined or non-finite are dropped.
    pub fn extract_features(&self, prices: &[f64]) -> Vec<RegimeFeatures> {
        let returns = math::pct_change(prices);
        let mut window = RollingWindow::new(self.config.rolling_window);
        let mut rows = Vec::new();

        for &r in &returns {
            window.push(r);
            if !window.is_full() {
                continue;
            }
            let Some(volatility) = window.sample_std() else {
                continue;
            };
            let row = RegimeFeatures {
                daily_return: r,
                weekly_return: window.sum(),
                volatility,
            };
            if row.as_array().iter().all(|v| v.is_finite()) {
                rows.push(row);
            }
        }
        rows
    }

    /// Cluster with the configured cluster count.
    pub fn cluster(&self, series: &PriceSeries) -> Result<Vec<ClusterProfile>> {
        self.cluster_with(series, self.config.clusters)
    }

    /// Partition feature rows into `k` clusters and summarise each one.
    /// Fewer valid rows than `k` is reported as insufficient data.
    pub fn cluster_with(&self, series: &PriceSeries, k: usize) -> Result<Vec<ClusterProfile>> {
        if k == 0 {
            return Err(EngineError::InvalidInput(
                "cluster count must be positive".to_string(),
            ));
        }
        series.require_non_empty()?;

        let rows = self.extract_features(&series.prices());
        if rows.len() < k {
            return Err(EngineError::insufficient(
                format!("{} regime clustering", series.symbol),
                k,
                rows.len(),
            ));
        }

        let points: Vec<[f64; 3]> = rows.iter().map(RegimeFeatures::as_array).collect();
        let assignments = kmeans(&points, k, self.config.max_iterations, self.config.seed);

        let profiles: Vec<ClusterProfile> = (0..k)
            .map(|cluster_id| {
                let members: Vec<&RegimeFeatures> = rows
                    .iter()
                    .zip(&assignments)
                    .filter_map(|(row, &a)| (a == cluster_id).then_some(row))
                    .collect();
                let count = members.len();
                let (mean_return, mean_volatility) = if count == 0 {
                    (0.0, 0.0)
                } else {
                    (
                        members.iter().map(|m| m.daily_return).sum::<f64>() / count as f64,
                        members.iter().map(|m| m.volatility).sum::<f64>() / count as f64,
                    )
                };
                ClusterProfile {
                    cluster_id,
                    member_count: count,
                    mean_return,
                    mean_volatility,
                }
            })
            .collect();

        debug!(
            symbol = %series.symbol,
            rows = rows.len(),
            clusters = k,
            "RegimeClusterer: clustered {} rows into {} regimes",
            rows.len(),
            k
        );
        Ok(profiles)
    }
}

impl Default for RegimeClusterer {
    fn default() -> Self {
        Self {
            config: ClusterConfig::default(),
        }
    }
}

/// Lloyd's k-means with k-means++ seeding. Returns the cluster index of
/// every point. Requires `points.len() >= k > 0`.
pub fn kmeans<const D: usize>(
    points: &[[f64; D]],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centers = seed_centers(points, k, &mut rng);
    let mut assignments = vec![usize::MAX; points.len()];

    for _ in 0..max_iterations {
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_center(point, &centers);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        // Empty clusters keep their previous centre.
        let mut sums = vec![[0.0; D]; k];
        let mut counts = vec![0usize; k];
        for (point, &a) in points.iter().zip(&assignments) {
            counts[a] += 1;
            for d in 0..D {
                sums[a][d] += point[d];
            }
        }
        for c in 0..k {
            if counts[c] > 0 {
                for d in 0..D {
                    centers[c][d] = sums[c][d] / counts[c] as f64;
                }
            }
        }
    }

    assignments
}

fn seed_centers<const D: usize>(points: &[[f64; D]], k: usize, rng: &mut StdRng) -> Vec<[f64; D]> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.gen_range(0..points.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centers
                    .iter()
                    .map(|c| math::squared_distance(p, c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let next = if total > 0.0 && total.is_finite() {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            rng.gen_range(0..points.len())
        };
        centers.push(points[next]);
    }
    centers
}

fn nearest_center<const D: usize>(point: &[f64; D], centers: &[[f64; D]]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, center) in centers.iter().enumerate() {
        let dist = math::squared_distance(point, center);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}
