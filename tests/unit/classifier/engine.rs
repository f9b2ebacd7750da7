//! Unit tests for the asset classifier

use coinsight::classifier::{
    assign_categories, combine_scores, has_text_score, AssetClassifier, KeywordTextClassifier,
    TextClassifier,
};
use coinsight::config::{ClassificationThresholds, ClassifierConfig};
use coinsight::error::{EngineError, Result};
use coinsight::models::asset::{AssetFeatures, AssetRecord, Category, CategoryScore};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

struct FixedText(HashMap<String, f64>);

impl TextClassifier for FixedText {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<HashMap<String, f64>> {
        Ok(self.0.clone())
    }
}

struct FailingText;

impl TextClassifier for FailingText {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<HashMap<String, f64>> {
        Err(EngineError::InvalidInput("model not loaded".to_string()))
    }
}

fn fixed(pairs: &[(&str, f64)]) -> Arc<dyn TextClassifier> {
    Arc::new(FixedText(
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    ))
}

fn classifier() -> AssetClassifier {
    AssetClassifier::new(ClassifierConfig::default()).unwrap()
}

#[test]
fn test_feature_only_default_record() {
    let result = classifier().classify(&AssetRecord::new("XYZ", "anything"));

    assert!(!result.text_scored);
    assert!(result.confident);
    assert_eq!(result.primary, None);
    assert_eq!(
        result.secondary,
        vec![Category::L1, Category::Privacy, Category::Infrastructure]
    );
    assert!((result.score(Category::Meme).unwrap() - 0.001 / 3.0).abs() < 1e-9);
    assert_eq!(result.score(Category::DeFi), Some(0.0));
    assert_eq!(result.score(Category::L1), Some(0.5));
}

#[test]
fn test_text_scores_lift_primary() {
    let classifier = classifier().with_text_classifier(fixed(&[("L1", 1.0)]));
    let result = classifier.classify(&AssetRecord::new("ETH", "smart contract platform"));

    assert!(result.text_scored);
    assert_eq!(result.score(Category::L1), Some(0.75));
    assert_eq!(result.primary, Some(Category::L1));
    assert_eq!(result.secondary, vec![Category::Privacy, Category::Infrastructure]);
}

#[test]
fn test_failing_text_falls_back_to_features() {
    let classifier = classifier().with_text_classifier(Arc::new(FailingText));
    let result = classifier.classify(&AssetRecord::new("XYZ", "anything"));
    assert!(!result.text_scored);
    assert_eq!(result.score(Category::L1), Some(0.5));
}

#[test]
fn test_text_scores_without_capability() {
    assert!(matches!(
        classifier().text_scores("anything"),
        Err(EngineError::MissingCapability(_))
    ));
    let failing = classifier().with_text_classifier(Arc::new(FailingText));
    assert!(matches!(
        failing.text_scores("anything"),
        Err(EngineError::MissingCapability(_))
    ));
}

#[test]
fn test_scores_clamped_to_unit_range() {
    let classifier = classifier()
        .with_text_classifier(fixed(&[("MEME", 7.0), ("DeFi", -3.0)]))
        .with_scorer(Category::Meme, |_: &AssetFeatures| 4.0)
        .unwrap();
    let result = classifier.classify(&AssetRecord::new("PEPE", ""));
    for score in result.scores.values() {
        assert!((0.0..=1.0).contains(score));
    }
    assert_eq!(result.score(Category::Meme), Some(1.0));
    assert_eq!(result.primary, Some(Category::Meme));
}

#[test]
fn test_scorer_for_disabled_category_rejected() {
    let mut config = ClassifierConfig::default();
    config.categories.remove(&Category::GameFi);
    let result = AssetClassifier::new(config)
        .unwrap()
        .with_scorer(Category::GameFi, |_: &AssetFeatures| 1.0);
    assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
}

#[test]
fn test_empty_category_set_rejected() {
    let config = ClassifierConfig {
        categories: BTreeMap::new(),
        ..ClassifierConfig::default()
    };
    assert!(AssetClassifier::new(config).is_err());
}

#[test]
fn test_combine_averages_where_text_exists() {
    let mut features = CategoryScore::new();
    features.insert(Category::DeFi, 0.4);
    features.insert(Category::L1, 0.6);
    let text: HashMap<String, f64> = [("DeFi".to_string(), 0.8), ("Unknown".to_string(), 1.0)]
        .into_iter()
        .collect();

    let combined = combine_scores(&features, Some(&text));
    assert!((combined[&Category::DeFi] - 0.6).abs() < 1e-12);
    assert_eq!(combined[&Category::L1], 0.6);
    assert_eq!(combined.len(), 2);
}

#[test]
fn test_identical_text_and_feature_scores_unchanged() {
    let mut features = CategoryScore::new();
    features.insert(Category::Meme, 0.3);
    features.insert(Category::Privacy, 0.9);
    let text: HashMap<String, f64> = features
        .iter()
        .map(|(c, s)| (c.label().to_string(), *s))
        .collect();
    assert_eq!(combine_scores(&features, Some(&text)), features);
}

#[test]
fn test_assign_below_confidence() {
    let mut scores = CategoryScore::new();
    scores.insert(Category::Meme, 0.2);
    scores.insert(Category::DeFi, 0.1);
    let result = assign_categories("XYZ", scores, &ClassificationThresholds::default());
    assert!(!result.is_classified());
    assert_eq!(result.primary, None);
    assert!(result.secondary.is_empty());
}

#[test]
fn test_assign_primary_and_secondary() {
    let mut scores = CategoryScore::new();
    scores.insert(Category::DeFi, 0.85);
    scores.insert(Category::GameFi, 0.45);
    scores.insert(Category::Meme, 0.39);
    let result = assign_categories("UNI", scores, &ClassificationThresholds::default());
    assert_eq!(result.primary, Some(Category::DeFi));
    assert_eq!(result.secondary, vec![Category::GameFi]);
}

#[test]
fn test_keyword_classifier_end_to_end() {
    let config = ClassifierConfig::default();
    let text = KeywordTextClassifier::new(config.categories.clone());
    let classifier = AssetClassifier::new(config)
        .unwrap()
        .with_text_classifier(Arc::new(text));
    let result = classifier.classify(&AssetRecord::new("DOGE", "The original doge meme coin"));
    assert!(result.text_scored);
    assert!(result.score(Category::Meme).unwrap() > result.score(Category::DeFi).unwrap());
}

#[test]
fn test_unordered_thresholds_rejected() {
    let config = ClassifierConfig {
        thresholds: ClassificationThresholds {
            primary_category: -1.0,
            secondary_category: 5.0,
            confidence_required: -3.0,
        },
        ..ClassifierConfig::default()
    };
    assert!(matches!(
        AssetClassifier::new(config),
        Err(EngineError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_default_feature_score_out_of_range_rejected() {
    let config = ClassifierConfig {
        default_feature_score: 1.5,
        ..ClassifierConfig::default()
    };
    assert!(matches!(
        AssetClassifier::new(config),
        Err(EngineError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_keyword_miss_is_feature_only() {
    let config = ClassifierConfig::default();
    let text = KeywordTextClassifier::new(config.categories.clone());
    let classifier = AssetClassifier::new(config)
        .unwrap()
        .with_text_classifier(Arc::new(text));

    let result = classifier.classify(&AssetRecord::new("XYZ", "nothing relevant here"));
    assert!(!result.text_scored);
    assert_eq!(result.score(Category::L1), Some(0.5));
}

#[test]
fn test_unknown_text_labels_are_feature_only() {
    let classifier = classifier().with_text_classifier(fixed(&[("Unknown", 1.0)]));
    let result = classifier.classify(&AssetRecord::new("XYZ", "anything"));
    assert!(!result.text_scored);
    assert_eq!(result.score(Category::L1), Some(0.5));
}

#[test]
fn test_has_text_score() {
    let mut features = CategoryScore::new();
    features.insert(Category::DeFi, 0.4);
    let matching: HashMap<String, f64> = [("DeFi".to_string(), 0.0)].into_iter().collect();
    let unrelated: HashMap<String, f64> = [("MEME".to_string(), 1.0)].into_iter().collect();
    let non_finite: HashMap<String, f64> = [("DeFi".to_string(), f64::NAN)].into_iter().collect();

    assert!(has_text_score(&features, &matching));
    assert!(!has_text_score(&features, &unrelated));
    assert!(!has_text_score(&features, &non_finite));
    assert!(!has_text_score(&features, &HashMap::new()));
}
