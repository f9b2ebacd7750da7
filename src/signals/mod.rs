//! Discrete trading signals derived from indicator snapshots.

pub mod signal_generator;

pub use signal_generator::SignalGenerator;
