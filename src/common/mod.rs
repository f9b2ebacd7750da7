//! Numeric helpers shared by the indicator, pattern and classifier engines.

pub mod math;
pub mod window;

pub use window::RollingWindow;
