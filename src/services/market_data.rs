//! Boundaries to the market-data and persistence collaborators.

use crate::error::{EngineError, Result};
use crate::models::alert::MarketSnapshot;
use crate::models::asset::AssetRecord;
use crate::models::indicators::PriceSeries;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Historical prices for a symbol, oldest first.
    async fn get_series(&self, symbol: &str, limit: usize) -> Result<PriceSeries>;

    /// Current market snapshot for each requested symbol that is known.
    async fn get_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>>;

    /// Metadata and metrics used for classification.
    async fn get_asset_record(&self, symbol: &str) -> Result<AssetRecord>;
}

/// Historical snapshot storage. The engine only reads priors and records the
/// latest snapshots; how they are persisted is up to the implementation.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn latest_snapshots(&self) -> Result<HashMap<String, MarketSnapshot>>;

    async fn store_snapshots(&self, snapshots: &[MarketSnapshot]) -> Result<()>;
}

/// In-memory market data and snapshot store.
#[derive(Debug, Default)]
pub struct StaticMarketData {
    series: RwLock<HashMap<String, PriceSeries>>,
    snapshots: RwLock<HashMap<String, MarketSnapshot>>,
    records: RwLock<HashMap<String, AssetRecord>>,
    history: RwLock<HashMap<String, MarketSnapshot>>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_series(&self, series: PriceSeries) {
        self.series.write().await.insert(series.symbol.clone(), series);
    }

    pub async fn insert_snapshot(&self, snapshot: MarketSnapshot) {
        self.snapshots
            .write()
            .await
            .insert(snapshot.symbol.clone(), snapshot);
    }

    pub async fn insert_record(&self, record: AssetRecord) {
        self.records.write().await.insert(record.symbol.clone(), record);
    }

    /// Seed the stored history used as the prior for alerting.
    pub async fn insert_prior(&self, snapshot: MarketSnapshot) {
        self.history
            .write()
            .await
            .insert(snapshot.symbol.clone(), snapshot);
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn get_series(&self, symbol: &str, limit: usize) -> Result<PriceSeries> {
        let series = self.series.read().await;
        let found = series.get(symbol).ok_or_else(|| {
            EngineError::MarketDataUnavailable(format!("no price series for {}", symbol))
        })?;
        let points = found.points();
        let start = points.len().saturating_sub(limit);
        PriceSeries::new(symbol, points[start..].to_vec())
    }

    async fn get_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(symbols
            .iter()
            .filter_map(|s| snapshots.get(s).cloned())
            .collect())
    }

    async fn get_asset_record(&self, symbol: &str) -> Result<AssetRecord> {
        self.records.read().await.get(symbol).cloned().ok_or_else(|| {
            EngineError::MarketDataUnavailable(format!("no asset record for {}", symbol))
        })
    }
}

#[async_trait]
impl SnapshotStore for StaticMarketData {
    async fn latest_snapshots(&self) -> Result<HashMap<String, MarketSnapshot>> {
        Ok(self.history.read().await.clone())
    }

    async fn store_snapshots(&self, snapshots: &[MarketSnapshot]) -> Result<()> {
        let mut history = self.history.write().await;
        for snapshot in snapshots {
            history.insert(snapshot.symbol.clone(), snapshot.clone());
        }
        Ok(())
    }
}
