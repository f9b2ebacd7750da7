//! Engine configuration: windows, thresholds and category definitions.
//!
//! Loaded once at construction and treated as read-only afterwards.

use crate::error::{EngineError, Result};
use crate::models::asset::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "COINSIGHT_CONFIG";

/// Current deployment environment (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub bollinger_window: usize,
    pub bollinger_std_dev: f64,
    pub sma_periods: Vec<usize>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            bollinger_window: 20,
            bollinger_std_dev: 2.0,
            sma_periods: vec![7, 14, 30],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub double_distance: usize,
    pub head_shoulders_distance: usize,
    pub relative_threshold: f64,
    pub triangle_window: usize,
    pub triangle_rolling_span: usize,
    pub flatness_threshold: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            double_distance: 20,
            head_shoulders_distance: 10,
            relative_threshold: 0.02,
            triangle_window: 20,
            triangle_rolling_span: 5,
            flatness_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub clusters: usize,
    pub rolling_window: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: 5,
            rolling_window: 7,
            max_iterations: 300,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub primary_category: f64,
    pub secondary_category: f64,
    pub confidence_required: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            primary_category: 0.7,
            secondary_category: 0.4,
            confidence_required: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Category -> keyword list. Keys are the enabled category set.
    pub categories: BTreeMap<Category, Vec<String>>,
    pub thresholds: ClassificationThresholds,
    /// Score used for categories without a dedicated feature scorer.
    pub default_feature_score: f64,
    /// Rank assumed when the record has none.
    pub missing_rank: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let keywords = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Meme,
            keywords(&["doge", "shiba", "pepe", "meme", "inu", "moon", "safe"]),
        );
        categories.insert(
            Category::DeFi,
            keywords(&["swap", "yield", "lending", "defi", "dao", "governance"]),
        );
        categories.insert(
            Category::L1,
            keywords(&["chain", "blockchain", "platform", "smart contract"]),
        );
        categories.insert(
            Category::GameFi,
            keywords(&["game", "play", "nft", "metaverse", "virtual"]),
        );
        categories.insert(
            Category::Privacy,
            keywords(&["privacy", "anonymous", "confidential", "zero-knowledge"]),
        );
        categories.insert(
            Category::Infrastructure,
            keywords(&["oracle", "bridge", "interoperability", "scaling"]),
        );

        Self {
            categories,
            thresholds: ClassificationThresholds::default(),
            default_feature_score: 0.5,
            missing_rank: 999,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Percent move that triggers a price alert.
    pub price_change_threshold: f64,
    /// Percent move that triggers a volume alert.
    pub volume_change_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            price_change_threshold: 5.0,
            volume_change_threshold: 20.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
    pub patterns: PatternConfig,
    pub clustering: ClusterConfig,
    pub classifier: ClassifierConfig,
    pub alerts: AlertConfig,
}

impl EngineConfig {
    /// Load configuration from `.env`, an optional JSON file and env overrides.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Some(v) = env_parse::<f64>("PRICE_CHANGE_ALERT") {
            config.alerts.price_change_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("VOLUME_CHANGE_ALERT") {
            config.alerts.volume_change_threshold = v;
        }
        if let Some(v) = env_parse::<usize>("CLUSTER_COUNT") {
            config.clustering.clusters = v;
        }
        if let Some(v) = env_parse::<usize>("RSI_PERIOD") {
            config.indicators.rsi_period = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section. Engine constructors run the same checks.
    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.patterns.validate()?;
        self.clustering.validate()?;
        self.classifier.validate()?;
        self.alerts.validate()?;
        Ok(())
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<()> {
        positive("indicators.macd_fast", self.macd_fast)?;
        positive("indicators.macd_slow", self.macd_slow)?;
        positive("indicators.macd_signal", self.macd_signal)?;
        positive("indicators.rsi_period", self.rsi_period)?;
        positive("indicators.bollinger_window", self.bollinger_window)?;
        if self.macd_fast >= self.macd_slow {
            return Err(invalid(format!(
                "indicators.macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bollinger_window < 2 {
            return Err(invalid("indicators.bollinger_window must be at least 2"));
        }
        positive_f64("indicators.bollinger_std_dev", self.bollinger_std_dev)?;
        for period in &self.sma_periods {
            positive("indicators.sma_periods", *period)?;
        }
        Ok(())
    }
}

impl SignalConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(invalid(format!(
                "signals: oversold ({}) must be below overbought ({}) within [0, 100]",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}

impl PatternConfig {
    pub fn validate(&self) -> Result<()> {
        positive("patterns.double_distance", self.double_distance)?;
        positive("patterns.head_shoulders_distance", self.head_shoulders_distance)?;
        positive("patterns.triangle_window", self.triangle_window)?;
        positive("patterns.triangle_rolling_span", self.triangle_rolling_span)?;
        if self.triangle_window < 2 {
            return Err(invalid("patterns.triangle_window must be at least 2"));
        }
        positive_f64("patterns.relative_threshold", self.relative_threshold)?;
        positive_f64("patterns.flatness_threshold", self.flatness_threshold)?;
        Ok(())
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        positive("clustering.clusters", self.clusters)?;
        positive("clustering.max_iterations", self.max_iterations)?;
        if self.rolling_window < 2 {
            return Err(invalid("clustering.rolling_window must be at least 2"));
        }
        Ok(())
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(invalid("classifier.categories must not be empty"));
        }
        let t = &self.thresholds;
        let ordered = t.confidence_required > 0.0
            && t.confidence_required <= t.secondary_category
            && t.secondary_category <= t.primary_category
            && t.primary_category <= 1.0;
        if !ordered {
            return Err(invalid(format!(
                "classifier.thresholds must satisfy 0 < confidence_required ({}) <= secondary ({}) <= primary ({}) <= 1",
                t.confidence_required, t.secondary_category, t.primary_category
            )));
        }
        if !(0.0..=1.0).contains(&self.default_feature_score) {
            return Err(invalid("classifier.default_feature_score must be within [0, 1]"));
        }
        Ok(())
    }
}

impl AlertConfig {
    pub fn validate(&self) -> Result<()> {
        positive_f64("alerts.price_change_threshold", self.price_change_threshold)?;
        positive_f64("alerts.volume_change_threshold", self.volume_change_threshold)?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidConfiguration(msg.into())
}

fn positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid(format!("{} must be > 0", name)));
    }
    Ok(())
}

fn positive_f64(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(format!("{} must be a positive number, got {}", name, value)));
    }
    Ok(())
}
