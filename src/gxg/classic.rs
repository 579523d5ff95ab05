//! Classic GHG, GLG and GVG.
//!
//! The series is resampled to daily means, gaps are filled, and only the
//! 14th and 28th of each month are kept. Those values are aggregated per
//! calendar year and the yearly values are averaged.
//!
//! There is no minimum series length: a year with a single sampling day
//! still yields a value.

use super::fill::fill_daily;
use super::params::{GxgParams, Output};
use super::resample::{is_in_spring, is_sampling_day, resample_daily, DailyAggregation};
use super::{GxgValue, YearlyAggregate};
use crate::core::TimeSeries;
use crate::utils::stats::{mean, mean_of_largest, mean_of_smallest};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Number of extreme values averaged per year for GHG and GLG.
const EXTREMES_PER_YEAR: usize = 3;

/// Reduces the sampling-day values of one year to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearAggregator {
    /// Mean of the three highest values.
    MeanHighest,
    /// Mean of the three lowest values.
    MeanLowest,
    /// Mean of the values in the spring window, NaN if there are none.
    MeanSpring,
}

impl YearAggregator {
    pub fn aggregate(&self, days: &[NaiveDate], values: &[f64]) -> f64 {
        match self {
            YearAggregator::MeanHighest => mean_of_largest(values, EXTREMES_PER_YEAR),
            YearAggregator::MeanLowest => mean_of_smallest(values, EXTREMES_PER_YEAR),
            YearAggregator::MeanSpring => {
                let spring: Vec<f64> = days
                    .iter()
                    .zip(values)
                    .filter(|(day, _)| is_in_spring(**day))
                    .map(|(_, &v)| v)
                    .collect();
                mean(&spring)
            }
        }
    }
}

/// Average highest groundwater level.
pub fn ghg(series: &TimeSeries, params: &GxgParams) -> GxgValue {
    gxg(series, YearAggregator::MeanHighest, params)
}

/// Average lowest groundwater level.
pub fn glg(series: &TimeSeries, params: &GxgParams) -> GxgValue {
    gxg(series, YearAggregator::MeanLowest, params)
}

/// Average spring groundwater level.
pub fn gvg(series: &TimeSeries, params: &GxgParams) -> GxgValue {
    gxg(series, YearAggregator::MeanSpring, params)
}

/// Shared classic pipeline, parameterized by the year aggregator.
///
/// When no value falls on a 14th or 28th the `Mean` output is NaN and the
/// `Yearly` output is an empty series, whose [`GxgValue::mean`] is NaN too.
pub fn gxg(series: &TimeSeries, aggregator: YearAggregator, params: &GxgParams) -> GxgValue {
    let yearly = yearly_values(series, aggregator, params);
    match params.output {
        Output::Yearly => GxgValue::Yearly(yearly),
        Output::Mean => {
            let values: Vec<f64> = yearly.iter().map(|y| y.value).collect();
            GxgValue::Mean(crate::utils::stats::nan_mean(&values))
        }
    }
}

fn yearly_values(
    series: &TimeSeries,
    aggregator: YearAggregator,
    params: &GxgParams,
) -> Vec<YearlyAggregate> {
    let window = series.truncate(params.tmin, params.tmax);
    let daily = resample_daily(&window, DailyAggregation::Mean);
    let filled = fill_daily(&daily, params.fill_method, params.limit);
    let sampled = filled.retain_known(is_sampling_day);

    if sampled.is_empty() {
        log::debug!("no values on the 14th or 28th, {:?} undefined", aggregator);
        return Vec::new();
    }

    let mut by_year: BTreeMap<i32, (Vec<NaiveDate>, Vec<f64>)> = BTreeMap::new();
    for (day, value) in sampled.iter() {
        let entry = by_year.entry(day.year()).or_default();
        entry.0.push(day);
        entry.1.push(value);
    }

    by_year
        .into_iter()
        .map(|(year, (days, values))| YearlyAggregate {
            year,
            value: aggregator.aggregate(&days, &values),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gxg::params::{FillMethod, InterpolationKind};
    use approx::assert_relative_eq;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn yearly(value: &GxgValue) -> Vec<(i32, f64)> {
        value
            .yearly()
            .unwrap()
            .iter()
            .map(|y| (y.year, y.value))
            .collect()
    }

    fn no_fill() -> GxgParams {
        GxgParams::default().with_fill(FillMethod::None, None)
    }

    #[test]
    fn ghg_and_glg_average_three_extremes_per_year() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2020, 1, 14), 1.0),
            (at(2020, 1, 28), 5.0),
            (at(2020, 2, 14), 3.0),
            (at(2020, 2, 28), 4.0),
            (at(2020, 3, 14), 2.0),
            // Not on the sampling grid
            (at(2020, 3, 15), 100.0),
        ]);

        let high = ghg(&series, &no_fill());
        assert_relative_eq!(high.mean(), 4.0, epsilon = 1e-12);

        let low = glg(&series, &no_fill());
        assert_relative_eq!(low.mean(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn short_years_use_available_values() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2020, 6, 14), 1.0),
            (at(2021, 6, 14), 2.0),
            (at(2021, 6, 28), 4.0),
        ]);

        let params = no_fill().with_output(Output::Yearly);
        assert_eq!(yearly(&ghg(&series, &params)), vec![(2020, 1.0), (2021, 3.0)]);
        assert_relative_eq!(ghg(&series, &no_fill()).mean(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn gvg_averages_spring_values_per_year() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2018, 3, 14), 5.0),
            (at(2019, 3, 28), 6.0),
            (at(2020, 4, 14), 7.0),
        ]);

        let params = no_fill().with_output(Output::Yearly);
        assert_eq!(
            yearly(&gvg(&series, &params)),
            vec![(2018, 5.0), (2019, 6.0), (2020, 7.0)]
        );
        assert_relative_eq!(gvg(&series, &no_fill()).mean(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn gvg_year_without_spring_is_nan_and_skipped_in_mean() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2019, 3, 14), 4.0),
            (at(2019, 4, 14), 6.0),
            (at(2020, 8, 14), 100.0),
        ]);

        let value = gvg(&series, &no_fill().with_output(Output::Yearly));
        let years = yearly(&value);
        assert_eq!(years[0], (2019, 5.0));
        assert_eq!(years[1].0, 2020);
        assert!(years[1].1.is_nan());

        assert_relative_eq!(gvg(&series, &no_fill()).mean(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn no_sampling_days_yield_nan() {
        let series = TimeSeries::from_unsorted(vec![(at(2020, 1, 1), 1.0), (at(2020, 1, 10), 2.0)]);

        assert!(ghg(&series, &no_fill()).mean().is_nan());
        let yearly = ghg(&series, &no_fill().with_output(Output::Yearly));
        assert_eq!(yearly.yearly().map(|y| y.len()), Some(0));
        assert!(gvg(&TimeSeries::empty(), &GxgParams::default()).mean().is_nan());
    }

    #[test]
    fn linear_fill_reaches_sampling_days() {
        // The 14th is interpolated between the 10th and the 18th
        let series = TimeSeries::from_unsorted(vec![(at(2020, 1, 10), 1.0), (at(2020, 1, 18), 9.0)]);

        let value = ghg(&series, &GxgParams::default());
        assert_relative_eq!(value.mean(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn fill_limit_keeps_far_sampling_days_missing() {
        // 28-day gap: values rise by one per day when interpolated
        let series = TimeSeries::from_unsorted(vec![(at(2020, 1, 1), 0.0), (at(2020, 1, 30), 29.0)]);

        let limited = GxgParams::default()
            .with_fill(FillMethod::Interpolate(InterpolationKind::Linear), Some(15))
            .with_output(Output::Yearly);
        // 2..=16 January filled: the 14th (13.0) but not the 28th
        assert_eq!(yearly(&ghg(&series, &limited)), vec![(2020, 13.0)]);

        let unlimited = limited.with_fill(FillMethod::Interpolate(InterpolationKind::Linear), None);
        assert_eq!(yearly(&ghg(&series, &unlimited)), vec![(2020, 20.0)]);
    }

    #[test]
    fn forward_fill_limit_applies_per_gap() {
        let series = TimeSeries::from_unsorted(vec![(at(2020, 1, 1), 3.0), (at(2020, 1, 20), 1.0)]);

        let params = GxgParams::default().with_fill(FillMethod::ForwardFill, Some(12));
        // The 14th is 13 days after the 1st: left missing, the 28th lies after the last sample
        assert!(glg(&series, &params).mean().is_nan());

        let params = params.with_fill(FillMethod::ForwardFill, Some(13));
        assert_relative_eq!(glg(&series, &params).mean(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn years_without_samples_have_no_entry() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2018, 5, 14), 2.0),
            (at(2018, 5, 28), 4.0),
            (at(2020, 7, 14), 8.0),
        ]);

        let params = no_fill().with_output(Output::Yearly);
        assert_eq!(yearly(&ghg(&series, &params)), vec![(2018, 3.0), (2020, 8.0)]);
        assert_eq!(yearly(&glg(&series, &params)), vec![(2018, 3.0), (2020, 8.0)]);
        assert_relative_eq!(ghg(&series, &no_fill()).mean(), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn linear_fill_extends_past_last_known_day() {
        // The last record is missing, so the daily grid runs to the 20th
        let series = TimeSeries::from_unsorted(vec![(at(2020, 1, 1), 1.0), (at(2020, 1, 20), f64::NAN)]);

        assert_relative_eq!(ghg(&series, &GxgParams::default()).mean(), 1.0, epsilon = 1e-12);

        let short = GxgParams::default()
            .with_fill(FillMethod::Interpolate(InterpolationKind::Linear), Some(12));
        assert!(ghg(&series, &short).mean().is_nan());
    }

    #[test]
    fn window_restricts_input() {
        let series = TimeSeries::from_unsorted(vec![
            (at(2019, 1, 14), 50.0),
            (at(2020, 1, 14), 1.0),
            (at(2020, 1, 28), 2.0),
        ]);

        let params = no_fill().with_window(Some(at(2020, 1, 1)), None);
        assert_relative_eq!(ghg(&series, &params).mean(), 1.5, epsilon = 1e-12);
    }
}
