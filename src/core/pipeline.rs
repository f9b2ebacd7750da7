//! Per-run orchestration: pull data from collaborators, run the engines for
//! every symbol in parallel, evaluate alerts and hand them to a sink.

use crate::alerts::{deliver_alerts, AlertEvaluator, AlertSink, DeliveryReport};
use crate::classifier::AssetClassifier;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::indicators::IndicatorEngine;
use crate::models::alert::AlertEvent;
use crate::models::asset::{AssetRecord, Classification};
use crate::models::indicators::{IndicatorSnapshot, PriceSeries};
use crate::models::pattern::{ClusterProfile, PatternMatch};
use crate::models::signal::Signal;
use crate::patterns::{PatternDetector, RegimeClusterer};
use crate::services::market_data::{MarketDataProvider, SnapshotStore};
use crate::signals::SignalGenerator;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub const DEFAULT_HISTORY_LIMIT: usize = 250;

/// Stateless engines shared by all per-symbol tasks.
#[derive(Clone)]
pub struct Engines {
    pub indicators: IndicatorEngine,
    pub signals: SignalGenerator,
    pub patterns: PatternDetector,
    pub clusterer: RegimeClusterer,
    pub classifier: Option<Arc<AssetClassifier>>,
}

impl Engines {
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            indicators: IndicatorEngine::new(config.indicators.clone())?,
            signals: SignalGenerator::new(config.signals.clone())?,
            patterns: PatternDetector::new(config.patterns.clone())?,
            clusterer: RegimeClusterer::new(config.clustering.clone())?,
            classifier: None,
        })
    }

    /// Run indicators, signals, patterns and regime clustering on one series.
    /// Recoverable failures are recorded in `notes` instead of aborting.
    pub fn analyze_series(&self, series: &PriceSeries) -> SymbolAnalysis {
        let mut analysis = SymbolAnalysis::new(&series.symbol);

        match self.indicators.latest(series) {
            Ok(snapshot) => {
                analysis.signals = self.signals.generate_signals(&snapshot);
                analysis.snapshot = Some(snapshot);
            }
            Err(e) => analysis.notes.push(format!("indicators: {}", e)),
        }

        match self.patterns.identify_patterns(series) {
            Ok(patterns) => analysis.patterns = patterns,
            Err(e) => analysis.notes.push(format!("patterns: {}", e)),
        }

        match self.clusterer.cluster(series) {
            Ok(regimes) => analysis.regimes = Some(regimes),
            Err(e) => {
                debug!(symbol = %series.symbol, error = %e, "Regime clustering skipped");
                analysis.notes.push(format!("regimes: {}", e));
            }
        }

        analysis
    }

    pub fn classify(&self, record: &AssetRecord) -> Option<Classification> {
        self.classifier.as_ref().map(|c| c.classify(record))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<IndicatorSnapshot>,
    pub signals: Vec<Signal>,
    pub patterns: Vec<PatternMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regimes: Option<Vec<ClusterProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl SymbolAnalysis {
    fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            snapshot: None,
            signals: Vec::new(),
            patterns: Vec::new(),
            regimes: None,
            classification: None,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub symbols: Vec<SymbolAnalysis>,
    pub alerts: Vec<AlertEvent>,
    pub delivery: DeliveryReport,
}

pub struct AnalysisPipeline {
    engines: Arc<Engines>,
    alerts: AlertEvaluator,
    history_limit: usize,
}

impl AnalysisPipeline {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engines: Arc::new(Engines::from_config(config)?),
            alerts: AlertEvaluator::new(config.alerts.clone())?,
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    pub fn with_classifier(mut self, classifier: AssetClassifier) -> Self {
        Arc::make_mut(&mut self.engines).classifier = Some(Arc::new(classifier));
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    /// One full analysis pass over `symbols`.
    pub async fn run(
        &self,
        symbols: &[String],
        provider: &dyn MarketDataProvider,
        store: &dyn SnapshotStore,
        sink: &dyn AlertSink,
    ) -> Result<AnalysisReport> {
        let started = Instant::now();
        info!(count = symbols.len(), "AnalysisPipeline: starting run for {} symbols", symbols.len());

        let mut tasks = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let series = match provider.get_series(symbol, self.history_limit).await {
                Ok(series) => series,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "AnalysisPipeline: no price series");
                    let mut analysis = SymbolAnalysis::new(symbol);
                    analysis.notes.push(format!("market data: {}", e));
                    tasks.push(TaskInput::Skipped(analysis));
                    continue;
                }
            };
            let record = if self.engines.classifier.is_some() {
                match provider.get_asset_record(symbol).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        debug!(symbol = %symbol, error = %e, "AnalysisPipeline: no asset record");
                        None
                    }
                }
            } else {
                None
            };
            tasks.push(TaskInput::Ready(series, record));
        }

        let handles = tasks.into_iter().map(|input| {
            let engines = self.engines.clone();
            async move {
                match input {
                    TaskInput::Skipped(analysis) => analysis,
                    TaskInput::Ready(series, record) => {
                        let symbol = series.symbol.clone();
                        let result = tokio::task::spawn_blocking(move || {
                            let mut analysis = engines.analyze_series(&series);
                            analysis.classification =
                                record.as_ref().and_then(|r| engines.classify(r));
                            analysis
                        })
                        .await;
                        result.unwrap_or_else(|e| {
                            error!(symbol = %symbol, error = %e, "AnalysisPipeline: analysis task failed");
                            let mut analysis = SymbolAnalysis::new(&symbol);
                            analysis.notes.push(format!("task: {}", e));
                            analysis
                        })
                    }
                }
            }
        });
        let analyses = join_all(handles).await;

        let current = provider.get_snapshots(symbols).await?;
        let prior = store.latest_snapshots().await?;
        let alerts = self.alerts.check_alerts(&current, &prior);
        let delivery = deliver_alerts(sink, &alerts).await;
        store.store_snapshots(&current).await?;

        info!(
            symbols = analyses.len(),
            alerts = alerts.len(),
            failed_deliveries = delivery.failed.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "AnalysisPipeline: run complete"
        );

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            symbols: analyses,
            alerts,
            delivery,
        })
    }
}

enum TaskInput {
    Skipped(SymbolAnalysis),
    Ready(PriceSeries, Option<AssetRecord>),
}
