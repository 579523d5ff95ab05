//! Daily resampling of irregular series.

use crate::core::TimeSeries;
use crate::utils::stats::{mean, median};
use chrono::{Datelike, NaiveDate};

/// How samples within one calendar day are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyAggregation {
    Mean,
    Median,
}

/// A series with at most one value per calendar day.
///
/// Straight after resampling the days are contiguous from the first to the
/// last sampled day, with NaN on days without samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    days: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.days.iter().copied().zip(self.values.iter().copied())
    }

    /// Replace the values, keeping the days.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> DailySeries {
        debug_assert_eq!(values.len(), self.days.len());
        DailySeries {
            days: self.days.clone(),
            values,
        }
    }

    /// Keep the days matching `keep` that carry a known value.
    pub(crate) fn retain_known<F>(&self, keep: F) -> DailySeries
    where
        F: Fn(NaiveDate) -> bool,
    {
        let (days, values) = self
            .iter()
            .filter(|&(day, value)| value.is_finite() && keep(day))
            .unzip();
        DailySeries { days, values }
    }

    /// Values of the days in the spring window, over all years.
    pub(crate) fn spring_values(&self) -> Vec<f64> {
        self.iter()
            .filter(|&(day, value)| value.is_finite() && is_in_spring(day))
            .map(|(_, value)| value)
            .collect()
    }

    /// Known values only.
    pub(crate) fn known_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }
}

/// Resample to one value per calendar day.
///
/// Missing source values are ignored; a day with no usable samples is NaN.
pub fn resample_daily(series: &TimeSeries, how: DailyAggregation) -> DailySeries {
    let Some((first, last)) = series.day_span() else {
        return DailySeries::default();
    };

    let n_days = (last - first).num_days() as usize + 1;
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); n_days];
    for (t, v) in series.iter() {
        if v.is_finite() {
            let idx = (t.date() - first).num_days() as usize;
            buckets[idx].push(v);
        }
    }

    let values = buckets
        .iter()
        .map(|samples| {
            if samples.is_empty() {
                f64::NAN
            } else {
                match how {
                    DailyAggregation::Mean => mean(samples),
                    DailyAggregation::Median => median(samples),
                }
            }
        })
        .collect();

    DailySeries {
        days: first.iter_days().take(n_days).collect(),
        values,
    }
}

/// Spring window used for GVG: 14 March up to and including 14 April.
pub fn is_in_spring(day: NaiveDate) -> bool {
    (day.month() == 3 && day.day() >= 14) || (day.month() == 4 && day.day() < 15)
}

/// The semi-monthly sampling grid: 14th and 28th of each month.
pub fn is_sampling_day(day: NaiveDate) -> bool {
    day.day() == 14 || day.day() == 28
}
