//! Core data structures: series, filter identifiers and the grouped store.

mod group;
mod store;
mod time_series;

pub use group::{GroupKey, LayerAssignment};
pub use store::{GroupSeries, GroupedSeriesStore, SeriesRole};
pub use time_series::{Period, TimeSeries};
