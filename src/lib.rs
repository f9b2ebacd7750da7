//! Signal and classification engine for crypto market data.
//!
//! Components, leaves first:
//! - [`indicators::IndicatorEngine`]: MACD, RSI, Bollinger Bands, SMAs
//! - [`signals::SignalGenerator`]: BUY/SELL/OVERBOUGHT/OVERSOLD rules
//! - [`patterns::PatternDetector`] and [`patterns::RegimeClusterer`]
//! - [`classifier::AssetClassifier`]: multi-label category confidence
//! - [`alerts::AlertEvaluator`]: price/volume threshold alerts
//!
//! All engines are synchronous and hold only read-only configuration.
//! [`core::AnalysisPipeline`] wires them to the external collaborators.

pub mod alerts;
pub mod classifier;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod services;
pub mod signals;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
