//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tsp_stats::core::{GroupKey, GroupedSeriesStore, LayerAssignment, TimeSeries};

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn series(points: &[(NaiveDateTime, f64)]) -> TimeSeries {
    TimeSeries::from_unsorted(points.iter().copied())
}

/// Daily series starting at `start`, one value per day.
pub fn daily(start: NaiveDateTime, values: &[f64]) -> TimeSeries {
    TimeSeries::from_unsorted(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v)),
    )
}

/// Two locations, three filters, two layers, plus one simulated-only filter.
pub fn reference_store() -> GroupedSeriesStore {
    let b33 = GroupKey::new("B33A0001", 1);
    let b33_deep = GroupKey::new("B33A0001", 2);
    let b44 = GroupKey::new("B44C0010", 1);
    let sim_only = GroupKey::new("B50X0003", 1);

    let mut observed = Vec::new();
    let mut simulated = Vec::new();

    observed.push((b33.clone(), at(2020, 1, 1), 10.0));
    observed.push((b33.clone(), at(2020, 2, 1), 12.0));
    simulated.push((b33.clone(), at(2019, 12, 15), 9.5));
    simulated.push((b33.clone(), at(2020, 1, 10), 11.0));

    observed.push((b33_deep.clone(), at(2020, 1, 5), 8.0));
    observed.push((b33_deep.clone(), at(2020, 1, 20), 8.5));
    simulated.push((b33_deep.clone(), at(2020, 1, 1), 8.25));

    // Observations all precede the simulation
    observed.push((b44.clone(), at(2019, 6, 1), 3.0));
    simulated.push((b44.clone(), at(2020, 1, 1), 3.5));

    simulated.push((sim_only.clone(), at(2020, 1, 1), 1.0));

    let layers: LayerAssignment = vec![(b33, 1), (b33_deep, 2), (b44, 1)].into_iter().collect();
    GroupedSeriesStore::from_records(observed, simulated).with_layers(layers)
}
