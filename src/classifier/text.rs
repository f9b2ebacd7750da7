//! Pluggable free-text classification capability.

use crate::error::Result;
use crate::models::asset::Category;
use std::collections::{BTreeMap, HashMap};

/// Zero-shot style text classifier: maps text onto candidate labels.
///
/// Implementations return label -> score in [0, 1]. Labels may be omitted;
/// an `Err` (typically `MissingCapability`) puts the caller into
/// feature-only mode.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<HashMap<String, f64>>;
}

/// Keyword-frequency classifier over per-category keyword lists.
///
/// Text and keywords are split into lowercase words on non-alphanumeric
/// characters, so a keyword only matches whole words ("inu" never matches
/// "genuine") and multi-word keywords match consecutive words. Each label's
/// score is its share of all keyword hits in the text. Text with no hits
/// yields an empty mapping.
#[derive(Debug, Clone)]
pub struct KeywordTextClassifier {
    keywords: BTreeMap<Category, Vec<Vec<String>>>,
}

impl KeywordTextClassifier {
    pub fn new(keywords: BTreeMap<Category, Vec<String>>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(category, words)| {
                let phrases = words
                    .iter()
                    .map(|w| tokenize(w))
                    .filter(|phrase| !phrase.is_empty())
                    .collect();
                (category, phrases)
            })
            .collect();
        Self { keywords }
    }

    /// Number of distinct keywords of `category` present in `words`.
    fn hits(&self, words: &[String], category: Category) -> usize {
        self.keywords
            .get(&category)
            .map(|phrases| {
                phrases
                    .iter()
                    .filter(|phrase| words.windows(phrase.len()).any(|w| w == phrase.as_slice()))
                    .count()
            })
            .unwrap_or(0)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl TextClassifier for KeywordTextClassifier {
    fn classify(&self, text: &str, candidate_labels: &[&str]) -> Result<HashMap<String, f64>> {
        let words = tokenize(text);
        let counts: Vec<(&str, usize)> = candidate_labels
            .iter()
            .filter_map(|label| {
                let category: Category = label.parse().ok()?;
                Some((*label, self.hits(&words, category)))
            })
            .collect();

        let total: usize = counts.iter().map(|(_, c)| c).sum();
        if total == 0 {
            return Ok(HashMap::new());
        }

        Ok(counts
            .into_iter()
            .map(|(label, c)| (label.to_string(), c as f64 / total as f64))
            .collect())
    }
}
