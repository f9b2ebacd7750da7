//! Chart pattern detection and return-regime clustering.

pub mod clustering;
pub mod detector;
pub mod peaks;

pub use clustering::{RegimeClusterer, RegimeFeatures};
pub use detector::PatternDetector;
