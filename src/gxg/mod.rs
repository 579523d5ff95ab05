//! GXG groundwater level statistics.
//!
//! - GHG: average highest groundwater level
//! - GLG: average lowest groundwater level
//! - GVG: average spring groundwater level
//!
//! Each statistic is available by the classic method (daily resampling,
//! gap filling, 14th/28th sampling grid, yearly aggregation) and by a quantile
//! approximation. [`difference`] compares a simulated series against an
//! observed one under identical parameters.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tsp_stats::core::TimeSeries;
//! use tsp_stats::gxg::{classic, GxgParams};
//!
//! let t = |m, d| NaiveDate::from_ymd_opt(2020, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let series = TimeSeries::from_unsorted(vec![(t(3, 14), 1.2), (t(3, 28), 1.4), (t(4, 14), 1.0)]);
//!
//! let gvg = classic::gvg(&series, &GxgParams::default());
//! assert!((gvg.mean() - 1.2).abs() < 1e-12);
//! ```

pub mod classic;
pub mod difference;
pub mod fill;
pub mod params;
pub mod quantile;
pub mod resample;

pub use classic::YearAggregator;
pub use difference::{compare_groups, delta, evaluate, GxgComparison, GxgMethod, GxgStatistic};
pub use params::{
    FillMethod, GxgParams, InterpolationKind, Output, QuantileParams, DEFAULT_GHG_QUANTILE,
    DEFAULT_GLG_QUANTILE,
};
pub use resample::{resample_daily, DailyAggregation, DailySeries};

use crate::utils::stats::nan_mean;
use std::collections::BTreeMap;

/// Value of a statistic for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyAggregate {
    pub year: i32,
    pub value: f64,
}

/// Result of a GXG computation.
#[derive(Debug, Clone, PartialEq)]
pub enum GxgValue {
    /// Single value, NaN when undefined.
    Mean(f64),
    /// One entry per year with sampling data, in year order.
    Yearly(Vec<YearlyAggregate>),
}

impl GxgValue {
    /// Scalar view: the value itself, or the NaN-aware mean over the years.
    pub fn mean(&self) -> f64 {
        match self {
            GxgValue::Mean(v) => *v,
            GxgValue::Yearly(years) => {
                let values: Vec<f64> = years.iter().map(|y| y.value).collect();
                nan_mean(&values)
            }
        }
    }

    pub fn yearly(&self) -> Option<&[YearlyAggregate]> {
        match self {
            GxgValue::Mean(_) => None,
            GxgValue::Yearly(years) => Some(years),
        }
    }

    /// `self - other`, per year when both sides are yearly.
    ///
    /// Years present on only one side give NaN.
    pub fn difference(&self, other: &GxgValue) -> GxgValue {
        match (self, other) {
            (GxgValue::Yearly(a), GxgValue::Yearly(b)) => {
                let mut years: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
                for y in a {
                    years.entry(y.year).or_insert((f64::NAN, f64::NAN)).0 = y.value;
                }
                for y in b {
                    years.entry(y.year).or_insert((f64::NAN, f64::NAN)).1 = y.value;
                }
                GxgValue::Yearly(
                    years
                        .into_iter()
                        .map(|(year, (lhs, rhs))| YearlyAggregate {
                            year,
                            value: lhs - rhs,
                        })
                        .collect(),
                )
            }
            _ => GxgValue::Mean(self.mean() - other.mean()),
        }
    }
}
