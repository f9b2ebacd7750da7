//! Alert delivery boundary. Failures are reported, never retried and never
//! fed back into evaluation.

use crate::error::{EngineError, Result};
use crate::models::alert::AlertEvent;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, alert: &AlertEvent) -> Result<()>;
}

/// Writes alerts to the log. Used when no notification channel is configured.
#[derive(Debug, Clone, Default)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn deliver(&self, alert: &AlertEvent) -> Result<()> {
        info!(
            symbol = %alert.symbol,
            kind = alert.kind.as_str(),
            change = alert.change_percent,
            "Alert: {}",
            alert.message
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: Vec<DeliveryFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryFailure {
    pub alert: AlertEvent,
    pub reason: String,
}

impl DeliveryReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Hand every alert to the sink once, collecting failures.
pub async fn deliver_alerts(sink: &dyn AlertSink, alerts: &[AlertEvent]) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for alert in alerts {
        match sink.deliver(alert).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                let reason = match e {
                    EngineError::Delivery { reason, .. } => reason,
                    other => other.to_string(),
                };
                error!(
                    symbol = %alert.symbol,
                    kind = alert.kind.as_str(),
                    reason = %reason,
                    "Failed to send alert"
                );
                report.failed.push(DeliveryFailure {
                    alert: alert.clone(),
                    reason,
                });
            }
        }
    }
    report
}
