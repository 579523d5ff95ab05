//! TimeSeries data structure for irregularly sampled groundwater heads.

use crate::error::{Result, StatsError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive analysis period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    /// Create a period, rejecting an end before the start.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let period = Self { start, end };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(StatsError::InvalidParameter(format!(
                "period end {} lies before start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// A univariate time series with strictly increasing, timezone-naive timestamps.
///
/// Values may be missing (NaN). Lookups rely on the timestamps being sorted,
/// so every constructor either validates or establishes that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from already sorted timestamps.
    ///
    /// Returns an error when lengths differ or timestamps are not strictly
    /// increasing. Use [`TimeSeries::from_unsorted`] for raw reader output.
    pub fn new(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(StatsError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(StatsError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Build a series from (timestamp, value) pairs in any order.
    ///
    /// Pairs are sorted by timestamp. When a timestamp occurs more than once
    /// the value loaded last wins.
    pub fn from_unsorted<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        let mut pairs: Vec<(NaiveDateTime, f64)> = pairs.into_iter().collect();
        // Stable sort keeps load order among equal timestamps.
        pairs.sort_by_key(|&(t, _)| t);

        let mut timestamps: Vec<NaiveDateTime> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        let mut duplicates = 0usize;

        for (t, v) in pairs {
            match timestamps.last() {
                Some(&last) if last == t => {
                    duplicates += 1;
                    if let Some(slot) = values.last_mut() {
                        *slot = v;
                    }
                }
                _ => {
                    timestamps.push(t);
                    values.push(v);
                }
            }
        }

        if duplicates > 0 {
            log::debug!("collapsed {} duplicate timestamps (last value kept)", duplicates);
        }

        Self { timestamps, values }
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (timestamp, value) pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// First and last timestamp, if any.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Value stored exactly at `t`.
    pub fn get(&self, t: NaiveDateTime) -> Option<f64> {
        self.timestamps
            .binary_search(&t)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Value of the last entry with timestamp `<= t` (forward fill lookup).
    ///
    /// Returns `None` when every timestamp lies after `t`. The returned value
    /// itself may be NaN if that entry is missing.
    pub fn value_at_or_before(&self, t: NaiveDateTime) -> Option<f64> {
        let idx = self.timestamps.partition_point(|&ts| ts <= t);
        if idx == 0 {
            None
        } else {
            Some(self.values[idx - 1])
        }
    }

    /// Restrict to the inclusive window `[tmin, tmax]`; open bounds are unbounded.
    pub fn truncate(&self, tmin: Option<NaiveDateTime>, tmax: Option<NaiveDateTime>) -> TimeSeries {
        let start = match tmin {
            Some(t) => self.timestamps.partition_point(|&ts| ts < t),
            None => 0,
        };
        let end = match tmax {
            Some(t) => self.timestamps.partition_point(|&ts| ts <= t),
            None => self.len(),
        };

        if start >= end {
            return TimeSeries::empty();
        }

        TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        }
    }

    /// Calendar days covered by the series, from the first to the last sample.
    pub(crate) fn day_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.span().map(|(first, last)| (first.date(), last.date()))
    }
}
