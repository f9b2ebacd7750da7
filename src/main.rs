use chrono::{Duration, TimeZone, Utc};
use coinsight::classifier::{AssetClassifier, KeywordTextClassifier};
use coinsight::config::EngineConfig;
use coinsight::core::AnalysisPipeline;
use coinsight::logging;
use coinsight::models::{AssetRecord, MarketSnapshot, PriceSeries};
use coinsight::alerts::LogAlertSink;
use coinsight::services::StaticMarketData;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    logging::init_logging();

    let env = coinsight::config::get_environment();
    info!(environment = %env, "Starting coinsight demo run");

    let classifier = AssetClassifier::new(config.classifier.clone())?.with_text_classifier(Arc::new(
        KeywordTextClassifier::new(config.classifier.categories.clone()),
    ));
    let pipeline = AnalysisPipeline::new(&config)?.with_classifier(classifier);

    let data = StaticMarketData::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().ok_or("invalid start time")?;
    let step = Duration::hours(1);

    let demo = [
        ("BTC", 42_000.0, 0.004, "A decentralized blockchain platform and store of value."),
        ("DOGE", 0.08, 0.03, "The original meme coin, much wow, to the moon with the shiba army."),
        ("UNI", 6.5, 0.01, "Decentralized swap protocol with DAO governance and yield for liquidity."),
    ];

    let mut symbols = Vec::new();
    for (i, (symbol, base, wobble, description)) in demo.iter().enumerate() {
        let prices = synthetic_prices(*base, *wobble, 120, i as f64);
        let last = prices.last().copied().unwrap_or(*base);
        let history = prices.clone();
        data.insert_series(PriceSeries::from_prices(*symbol, start, step, &prices)?).await;
        data.insert_prior(MarketSnapshot::new(*symbol, prices[prices.len() - 25]).with_volume(1_000_000.0))
            .await;
        data.insert_snapshot(
            MarketSnapshot::new(*symbol, last)
                .with_volume(1_000_000.0 * (1.0 + i as f64 * 0.15))
                .with_timestamp(start + step * prices.len() as i32),
        )
        .await;

        let mut record = AssetRecord::new(*symbol, *description);
        record.price_history = history;
        record.market_cap_rank = Some(1 + i as u32 * 7);
        data.insert_record(record).await;
        symbols.push(symbol.to_string());
    }

    let report = pipeline.run(&symbols, &data, &data, &LogAlertSink).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Trending sine wave, deterministic per seed.
fn synthetic_prices(base: f64, wobble: f64, count: usize, seed: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let trend = 1.0 + 0.0015 * t * (seed - 1.0);
            let wave = (t / 6.0 + seed).sin() * wobble + (t / 17.0).cos() * wobble * 0.5;
            base * trend * (1.0 + wave)
        })
        .collect()
}
