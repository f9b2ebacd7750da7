//! Threshold alerts and their delivery boundary.

pub mod delivery;
pub mod evaluator;

pub use delivery::{deliver_alerts, AlertSink, DeliveryFailure, DeliveryReport, LogAlertSink};
pub use evaluator::{percent_change, AlertEvaluator};
