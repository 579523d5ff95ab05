//! Alignment of simulated heads onto observation times.
//!
//! The simulated series is forward filled onto the observed timestamps: for
//! each observation the last simulated value at or before it is used. There
//! is no interpolation. Observations preceding the first simulated value have
//! no residual.

use crate::batch::map_groups;
use crate::core::{GroupKey, GroupedSeriesStore, TimeSeries};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Residuals of one filter, each paired with the observation it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidualSeries {
    timestamps: Vec<NaiveDateTime>,
    residuals: Vec<f64>,
    observed: Vec<f64>,
}

impl ResidualSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Simulated minus observed.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Observed values at the residual timestamps.
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Residuals as a plain series.
    pub fn to_time_series(&self) -> TimeSeries {
        TimeSeries::from_unsorted(
            self.timestamps
                .iter()
                .copied()
                .zip(self.residuals.iter().copied()),
        )
    }
}

/// One row of the joined observed/simulated/residual table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRecord {
    pub timestamp: NaiveDateTime,
    pub observed: f64,
    /// Forward filled simulated value, NaN before the first simulated sample.
    pub simulated: f64,
    /// NaN where no residual is defined.
    pub residual: f64,
}

/// Compute residuals of `simulated` against `observed` for a single filter.
///
/// Only observed timestamps with a forward-fillable simulated value produce
/// an entry. Entries whose observed or simulated value is missing are
/// undefined and left out, so every stored residual is finite.
pub fn align_and_diff(observed: &TimeSeries, simulated: &TimeSeries) -> ResidualSeries {
    let mut result = ResidualSeries::default();
    if simulated.is_empty() {
        return result;
    }

    for (t, obs) in observed.iter() {
        let Some(sim) = simulated.value_at_or_before(t) else {
            continue;
        };
        let residual = sim - obs;
        if residual.is_finite() {
            result.timestamps.push(t);
            result.residuals.push(residual);
            result.observed.push(obs);
        }
    }

    result
}

/// Join observed values with the forward filled simulated value and residual.
///
/// Yields one row per observed timestamp, including rows where the residual
/// is undefined, for export by a table writer.
pub fn aligned_records(observed: &TimeSeries, simulated: &TimeSeries) -> Vec<AlignedRecord> {
    observed
        .iter()
        .map(|(timestamp, obs)| {
            let sim = simulated.value_at_or_before(timestamp).unwrap_or(f64::NAN);
            let residual = sim - obs;
            AlignedRecord {
                timestamp,
                observed: obs,
                simulated: sim,
                residual: if residual.is_finite() {
                    residual
                } else {
                    f64::NAN
                },
            }
        })
        .collect()
}

/// Residuals for every filter in the store, one entry per filter.
pub fn compute_residuals(store: &GroupedSeriesStore) -> BTreeMap<GroupKey, ResidualSeries> {
    map_groups(store.groups(), |key, group| {
        if group.simulated.is_empty() {
            log::debug!("{}: no simulated series, residuals left empty", key);
        }
        align_and_diff(&group.observed, &group.simulated)
    })
}
