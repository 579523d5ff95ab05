//! Numeric helpers shared by the statistics modules.

pub mod stats;

pub use stats::{mean, median, nan_mean, quantile, variance};
