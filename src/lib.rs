//! # tsp-stats
//!
//! Residual and error statistics for groundwater head series, plus the
//! GXG family of groundwater level characteristics.
//!
//! Observed and simulated heads are stored per filter (location and filter
//! number). Residuals align each observation with the most recent simulated
//! value, and are summarized per filter and per model layer. GHG, GLG and GVG
//! are computed both with the classic 14th/28th sampling method and with
//! quantile estimators.

#![allow(clippy::type_complexity)]

mod batch;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod gxg;
pub mod metrics;
pub mod residuals;
pub mod utils;

pub use error::{Result, StatsError};

pub mod prelude {
    pub use crate::config::StatisticsConfig;
    pub use crate::core::{GroupKey, GroupedSeriesStore, LayerAssignment, Period, TimeSeries};
    pub use crate::error::{Result, StatsError};
    pub use crate::evaluation::{evaluate, gxg_tables, EvaluationReport, MethodKind};
    pub use crate::gxg::{FillMethod, GxgMethod, GxgParams, GxgStatistic, GxgValue, Output, QuantileParams};
    pub use crate::metrics::{error_metrics, ErrorMetrics, LayerSummary};
    pub use crate::residuals::{compute_residuals, ResidualSeries};
}
