//! Asset category classification.

pub mod engine;
pub mod features;
pub mod scorers;
pub mod text;

pub use engine::{assign_categories, combine_scores, has_text_score, AssetClassifier};
pub use features::extract_features;
pub use scorers::{CategoryScorer, ScorerRegistry};
pub use text::{KeywordTextClassifier, TextClassifier};
