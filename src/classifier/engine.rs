//! Multi-label asset classification fusing feature scores with text scores.

use crate::classifier::features::extract_features;
use crate::classifier::scorers::{CategoryScorer, ScorerRegistry};
use crate::classifier::text::TextClassifier;
use crate::config::{ClassificationThresholds, ClassifierConfig};
use crate::error::{EngineError, Result};
use crate::models::asset::{AssetFeatures, AssetRecord, Category, CategoryScore, Classification};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AssetClassifier {
    config: ClassifierConfig,
    registry: ScorerRegistry,
    text_classifier: Option<Arc<dyn TextClassifier>>,
}

impl AssetClassifier {
    /// Classifier with the built-in scorers for the enabled categories and
    /// no text capability.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let registry = ScorerRegistry::builtin(config.categories.keys(), config.default_feature_score);
        Ok(Self {
            config,
            registry,
            text_classifier: None,
        })
    }

    pub fn with_text_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.text_classifier = Some(classifier);
        self
    }

    /// Register a dedicated scorer. The category must be enabled.
    pub fn with_scorer<S>(mut self, category: Category, scorer: S) -> Result<Self>
    where
        S: CategoryScorer + 'static,
    {
        if !self.config.categories.contains_key(&category) {
            return Err(EngineError::InvalidConfiguration(format!(
                "scorer registered for category {} which is not in the category set",
                category
            )));
        }
        self.registry.register(category, scorer);
        Ok(self)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.config.categories.keys()
    }

    pub fn registry(&self) -> &ScorerRegistry {
        &self.registry
    }

    pub fn extract_features(&self, record: &AssetRecord) -> AssetFeatures {
        extract_features(record, self.config.missing_rank)
    }

    /// Feature score for every enabled category.
    pub fn feature_scores(&self, features: &AssetFeatures) -> CategoryScore {
        self.categories()
            .map(|&c| (c, self.registry.score(c, features)))
            .collect()
    }

    /// Text scores for the description, or `MissingCapability` when no
    /// text classifier is plugged in or it fails.
    pub fn text_scores(&self, text: &str) -> Result<HashMap<String, f64>> {
        let classifier = self.text_classifier.as_ref().ok_or_else(|| {
            EngineError::MissingCapability("no text classifier configured".to_string())
        })?;
        let labels: Vec<&str> = self.categories().map(|c| c.label()).collect();
        classifier.classify(text, &labels).map_err(|e| match e {
            EngineError::MissingCapability(_) => e,
            other => EngineError::MissingCapability(format!("text classifier failed: {}", other)),
        })
    }

    /// Classify one asset. Never fails: without text scores the result is
    /// feature-only and flagged with `text_scored = false`.
    pub fn classify(&self, record: &AssetRecord) -> Classification {
        let features = self.extract_features(record);
        let feature_scores = self.feature_scores(&features);

        let text = match self.text_scores(&record.description) {
            Ok(scores) => Some(scores),
            Err(e) => {
                if self.text_classifier.is_some() {
                    warn!(symbol = %record.symbol, error = %e, "AssetClassifier: falling back to feature scores");
                } else {
                    debug!(symbol = %record.symbol, "AssetClassifier: feature-only classification");
                }
                None
            }
        };

        let text_scored = text
            .as_ref()
            .map(|t| has_text_score(&feature_scores, t))
            .unwrap_or(false);
        if text.is_some() && !text_scored {
            debug!(symbol = %record.symbol, "AssetClassifier: no usable text scores, feature-only");
        }

        let scores = combine_scores(&feature_scores, text.as_ref());
        let mut classification = assign_categories(&record.symbol, scores, &self.config.thresholds);
        classification.text_scored = text_scored;

        debug!(
            symbol = %record.symbol,
            primary = ?classification.primary,
            secondary = ?classification.secondary,
            "AssetClassifier: classified"
        );
        classification
    }
}

/// True when at least one enabled category has a finite text score, i.e.
/// [`combine_scores`] averages text into the result.
pub fn has_text_score(feature_scores: &CategoryScore, text_scores: &HashMap<String, f64>) -> bool {
    feature_scores.keys().any(|category| {
        text_scores
            .get(category.label())
            .map(|s| s.is_finite())
            .unwrap_or(false)
    })
}

/// `(text + feature) / 2` where a text score exists, the feature score
/// alone otherwise. Text labels outside the feature map are ignored.
pub fn combine_scores(
    feature_scores: &CategoryScore,
    text_scores: Option<&HashMap<String, f64>>,
) -> CategoryScore {
    feature_scores
        .iter()
        .map(|(&category, &feature)| {
            let text = text_scores
                .and_then(|t| t.get(category.label()))
                .copied()
                .filter(|s| s.is_finite());
            let combined = match text {
                Some(text) => (text.clamp(0.0, 1.0) + feature) / 2.0,
                None => feature,
            };
            (category, combined.clamp(0.0, 1.0))
        })
        .collect()
}

/// Pick primary/secondary categories from combined scores.
pub fn assign_categories(
    symbol: &str,
    scores: CategoryScore,
    thresholds: &ClassificationThresholds,
) -> Classification {
    let mut ranked: Vec<(Category, f64)> = scores.iter().map(|(&c, &s)| (c, s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let confident = ranked
        .first()
        .map(|(_, s)| *s >= thresholds.confidence_required)
        .unwrap_or(false);

    let mut primary = None;
    let mut secondary = Vec::new();
    if confident {
        if let Some(&(best, score)) = ranked.first() {
            if score >= thresholds.primary_category {
                primary = Some(best);
            }
        }
        secondary = ranked
            .iter()
            .filter(|(c, s)| Some(*c) != primary && *s >= thresholds.secondary_category)
            .map(|(c, _)| *c)
            .collect();
    }

    Classification {
        symbol: symbol.to_string(),
        scores,
        primary,
        secondary,
        confident,
        text_scored: false,
    }
}
