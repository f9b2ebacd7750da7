//! Per-category feature scorers and the registry that looks them up.

use crate::models::asset::{AssetFeatures, Category};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Maps features onto a confidence for one category.
pub trait CategoryScorer: Send + Sync {
    fn score(&self, features: &AssetFeatures) -> f64;
}

impl<F> CategoryScorer for F
where
    F: Fn(&AssetFeatures) -> f64 + Send + Sync,
{
    fn score(&self, features: &AssetFeatures) -> f64 {
        self(features)
    }
}

fn capped(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn average(parts: &[f64]) -> f64 {
    parts.iter().map(|p| capped(*p)).sum::<f64>() / parts.len() as f64
}

/// Volatile, low-ranked, socially loud.
pub fn meme_score(f: &AssetFeatures) -> f64 {
    average(&[
        f.volatility * 2.0,
        (1000.0 - f.market_cap_rank.min(1000.0)) / 1000.0,
        f.social_score / 100.0,
    ])
}

/// Value locked, developer activity, holder base.
pub fn defi_score(f: &AssetFeatures) -> f64 {
    average(&[
        f.tvl_ratio * 2.0,
        f.developer_score / 50.0,
        f.holder_count / 10_000.0,
    ])
}

/// NFT activity, community, development.
pub fn gamefi_score(f: &AssetFeatures) -> f64 {
    average(&[
        f.nft_activity / 100.0,
        f.social_score / 200.0,
        f.developer_score / 30.0,
    ])
}

/// Category -> scorer lookup with an explicit fallback for categories that
/// have no dedicated scorer.
#[derive(Clone)]
pub struct ScorerRegistry {
    scorers: BTreeMap<Category, Arc<dyn CategoryScorer>>,
    fallback: f64,
}

impl ScorerRegistry {
    pub fn empty(fallback: f64) -> Self {
        Self {
            scorers: BTreeMap::new(),
            fallback: capped(fallback),
        }
    }

    /// Built-in scorers (MEME, DeFi, GameFi) restricted to `enabled`.
    pub fn builtin<'a>(enabled: impl IntoIterator<Item = &'a Category>, fallback: f64) -> Self {
        let mut registry = Self::empty(fallback);
        for category in enabled {
            match category {
                Category::Meme => registry.register(*category, meme_score),
                Category::DeFi => registry.register(*category, defi_score),
                Category::GameFi => registry.register(*category, gamefi_score),
                _ => {}
            }
        }
        registry
    }

    pub fn register<S>(&mut self, category: Category, scorer: S)
    where
        S: CategoryScorer + 'static,
    {
        self.scorers.insert(category, Arc::new(scorer));
    }

    pub fn has_scorer(&self, category: Category) -> bool {
        self.scorers.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.scorers.keys()
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Score in [0, 1]; the fallback when no scorer is registered.
    pub fn score(&self, category: Category, features: &AssetFeatures) -> f64 {
        match self.scorers.get(&category) {
            Some(scorer) => capped(scorer.score(features)),
            None => self.fallback,
        }
    }
}

impl fmt::Debug for ScorerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorerRegistry")
            .field("categories", &self.scorers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}
