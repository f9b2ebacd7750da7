//! Value objects passed between the engine and its callers.

pub mod alert;
pub mod asset;
pub mod indicators;
pub mod pattern;
pub mod signal;

pub use alert::{AlertEvent, AlertKind, MarketSnapshot};
pub use asset::{AssetFeatures, AssetRecord, Category, CategoryScore, Classification};
pub use indicators::{IndicatorSnapshot, PricePoint, PriceSeries, SmaValue};
pub use pattern::{ClusterProfile, PatternKind, PatternMatch};
pub use signal::{IndicatorName, Signal, SignalDirection};
