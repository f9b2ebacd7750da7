//! Deterministic feature extraction from asset metadata.

use crate::common::math;
use crate::models::asset::{AssetFeatures, AssetRecord};

/// Derive normalised features. Missing metrics count as zero and a missing
/// market-cap rank falls back to `missing_rank`.
pub fn extract_features(record: &AssetRecord, missing_rank: u32) -> AssetFeatures {
    AssetFeatures {
        volatility: price_volatility(&record.price_history),
        market_cap_rank: f64::from(record.market_cap_rank.unwrap_or(missing_rank)),
        age_days: age_days(record),
        holder_count: count(record.holder_count),
        social_score: social_score(record),
        developer_score: developer_score(record),
        tvl_ratio: tvl_ratio(record),
        nft_activity: nft_activity(record),
    }
}

/// Sample standard deviation of period returns.
pub fn price_volatility(history: &[f64]) -> f64 {
    let returns: Vec<f64> = math::pct_change(history)
        .into_iter()
        .filter(|r| r.is_finite())
        .collect();
    math::sample_std(&returns).unwrap_or(0.0)
}

fn age_days(record: &AssetRecord) -> f64 {
    match (record.launch_date, record.observed_at) {
        (Some(launch), Some(now)) => (now - launch).num_days().max(0) as f64,
        _ => 0.0,
    }
}

fn social_score(record: &AssetRecord) -> f64 {
    let total = count(record.twitter_followers)
        + count(record.reddit_subscribers)
        + count(record.telegram_members)
        + count(record.github_stars);
    total / 1000.0
}

fn developer_score(record: &AssetRecord) -> f64 {
    let total = count(record.github_commits)
        + count(record.github_contributors)
        + count(record.github_issues);
    total / 100.0
}

fn tvl_ratio(record: &AssetRecord) -> f64 {
    let tvl = non_negative(record.total_value_locked);
    match record.market_cap {
        Some(cap) if cap > 0.0 && cap.is_finite() => tvl / cap,
        _ => 0.0,
    }
}

fn nft_activity(record: &AssetRecord) -> f64 {
    let total =
        non_negative(record.nft_volume) + count(record.nft_holders) + count(record.gaming_users);
    total / 1000.0
}

fn count(value: Option<u64>) -> f64 {
    value.unwrap_or(0) as f64
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}
