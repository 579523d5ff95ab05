//! Quantile approximations of GHG, GLG and GVG.
//!
//! These work on the daily median series as a whole, without gap filling or
//! a per-year breakdown, and have no minimum series length.

use super::params::{validate_quantile, DEFAULT_GHG_QUANTILE, DEFAULT_GLG_QUANTILE};
use super::resample::{resample_daily, DailyAggregation, DailySeries};
use crate::core::TimeSeries;
use crate::error::Result;
use crate::utils::stats::{median, quantile};
use chrono::NaiveDateTime;

fn daily_median(
    series: &TimeSeries,
    tmin: Option<NaiveDateTime>,
    tmax: Option<NaiveDateTime>,
) -> DailySeries {
    resample_daily(&series.truncate(tmin, tmax), DailyAggregation::Median)
}

/// GHG approximated by the `q` quantile of the daily values (default 0.94).
///
/// The `[tmin, tmax]` window applies to the raw samples, before the daily
/// median is taken.
pub fn q_ghg(
    series: &TimeSeries,
    tmin: Option<NaiveDateTime>,
    tmax: Option<NaiveDateTime>,
    q: Option<f64>,
) -> Result<f64> {
    let q = q.unwrap_or(DEFAULT_GHG_QUANTILE);
    validate_quantile(q)?;
    Ok(quantile(&daily_median(series, tmin, tmax).known_values(), q))
}

/// GLG approximated by the `q` quantile of the daily values (default 0.06).
pub fn q_glg(
    series: &TimeSeries,
    tmin: Option<NaiveDateTime>,
    tmax: Option<NaiveDateTime>,
    q: Option<f64>,
) -> Result<f64> {
    let q = q.unwrap_or(DEFAULT_GLG_QUANTILE);
    validate_quantile(q)?;
    Ok(quantile(&daily_median(series, tmin, tmax).known_values(), q))
}

/// GVG approximated by the median of all spring-window days, pooled over the years.
pub fn q_gvg(series: &TimeSeries, tmin: Option<NaiveDateTime>, tmax: Option<NaiveDateTime>) -> f64 {
    median(&daily_median(series, tmin, tmax).spring_values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn ramp() -> TimeSeries {
        // Days 1..=11 of January with values 0..=10, missing days in between ignored
        TimeSeries::from_unsorted((0..11).map(|i| (at(2020, 1, 1 + i, 0), i as f64)))
    }

    #[test]
    fn q_ghg_and_q_glg_use_default_quantiles() {
        let series = ramp();
        assert_relative_eq!(q_ghg(&series, None, None, None).unwrap(), 9.4, epsilon = 1e-10);
        assert_relative_eq!(q_glg(&series, None, None, None).unwrap(), 0.6, epsilon = 1e-10);
        assert_relative_eq!(q_ghg(&series, None, None, Some(0.5)).unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn quantiles_use_daily_medians() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2020, 1, 1, 0), 1.0),
            (at(2020, 1, 1, 6), 2.0),
            (at(2020, 1, 1, 12), 30.0),
            (at(2020, 1, 3, 0), 4.0),
        ]);
        // Daily medians: 2.0 and 4.0 (2 January has no samples)
        assert_relative_eq!(q_ghg(&series, None, None, Some(1.0)).unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(q_glg(&series, None, None, Some(0.0)).unwrap(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn quantile_window_and_empty_input() {
        let series = ramp();
        let windowed = q_ghg(&series, Some(at(2020, 1, 9, 0)), None, Some(0.0)).unwrap();
        assert_relative_eq!(windowed, 8.0, epsilon = 1e-10);

        assert!(q_ghg(&TimeSeries::empty(), None, None, None).unwrap().is_nan());
    }

    #[test]
    fn quantile_out_of_range_is_rejected() {
        let result = q_glg(&ramp(), None, None, Some(-0.1));
        assert!(matches!(result, Err(StatsError::InvalidParameter(_))));
    }

    #[test]
    fn q_gvg_pools_spring_days_over_years() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2019, 3, 20, 0), 1.0),
            (at(2019, 6, 1, 0), 100.0),
            (at(2020, 3, 14, 0), 2.0),
            (at(2020, 4, 1, 0), 3.0),
            (at(2020, 4, 15, 0), 100.0),
        ]);
        assert_relative_eq!(q_gvg(&series, None, None), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn q_gvg_without_spring_is_nan() {
        let series = TimeSeries::from_unsorted(vec![(at(2020, 6, 1, 0), 1.0)]);
        assert!(q_gvg(&series, None, None).is_nan());
    }
}
