//! External collaborator interfaces.

pub mod market_data;

pub use market_data::{MarketDataProvider, SnapshotStore, StaticMarketData};
