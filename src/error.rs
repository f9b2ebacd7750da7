//! Error taxonomy shared by every engine component.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Input shorter than the minimum window an operation needs.
    /// Recoverable: callers treat the affected value as undefined.
    #[error("Insufficient data for {context}: need {required}, got {available}")]
    InsufficientData {
        context: String,
        required: usize,
        available: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A pluggable capability (e.g. text classification) is unavailable.
    #[error("Missing capability: {0}")]
    MissingCapability(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Alert delivery failed for {symbol}: {reason}")]
    Delivery { symbol: String, reason: String },

    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn insufficient(context: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            available,
        }
    }

    /// Prefix the context of an `InsufficientData` error with the symbol it
    /// concerns. Other variants pass through unchanged.
    pub fn for_symbol(self, symbol: &str) -> Self {
        match self {
            Self::InsufficientData {
                context,
                required,
                available,
            } => Self::InsufficientData {
                context: format!("{} {}", symbol, context),
                required,
                available,
            },
            other => other,
        }
    }

    /// True for errors a caller should downgrade to "undefined" rather than abort on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::MissingCapability(_) | Self::Delivery { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
