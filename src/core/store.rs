//! Per-filter storage of observed and simulated series.

use super::group::{GroupKey, LayerAssignment};
use super::time_series::{Period, TimeSeries};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Observed and simulated series of one filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSeries {
    pub observed: TimeSeries,
    pub simulated: TimeSeries,
}

impl GroupSeries {
    pub fn new(observed: TimeSeries, simulated: TimeSeries) -> Self {
        Self {
            observed,
            simulated,
        }
    }

    /// Pick the series for one role.
    pub fn get(&self, role: SeriesRole) -> &TimeSeries {
        match role {
            SeriesRole::Observed => &self.observed,
            SeriesRole::Simulated => &self.simulated,
        }
    }
}

/// Which of the paired series a value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesRole {
    Observed,
    Simulated,
}

/// Ordered collection of paired series plus the layer metadata.
///
/// A filter that appears in only one role still gets an entry, with an empty
/// series for the other role.
#[derive(Debug, Clone, Default)]
pub struct GroupedSeriesStore {
    groups: BTreeMap<GroupKey, GroupSeries>,
    layers: LayerAssignment,
}

impl GroupedSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from flat (key, timestamp, value) records as a table reader delivers them.
    ///
    /// Records may arrive in any order; duplicates resolve last-write-wins per filter.
    pub fn from_records<O, S>(observed: O, simulated: S) -> Self
    where
        O: IntoIterator<Item = (GroupKey, NaiveDateTime, f64)>,
        S: IntoIterator<Item = (GroupKey, NaiveDateTime, f64)>,
    {
        let mut store = Self::new();
        for (key, series) in collect_by_group(observed) {
            store.set_series(key, SeriesRole::Observed, series);
        }
        for (key, series) in collect_by_group(simulated) {
            store.set_series(key, SeriesRole::Simulated, series);
        }
        log::debug!("store holds {} filters", store.len());
        store
    }

    /// Attach the layer assignment.
    pub fn with_layers(mut self, layers: LayerAssignment) -> Self {
        self.layers = layers;
        self
    }

    /// Insert or replace both series of a filter.
    pub fn insert(&mut self, key: GroupKey, observed: TimeSeries, simulated: TimeSeries) {
        self.groups.insert(key, GroupSeries::new(observed, simulated));
    }

    /// Insert or replace one series of a filter, keeping the other role.
    pub fn set_series(&mut self, key: GroupKey, role: SeriesRole, series: TimeSeries) {
        let group = self.groups.entry(key).or_default();
        match role {
            SeriesRole::Observed => group.observed = series,
            SeriesRole::Simulated => group.simulated = series,
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&GroupSeries> {
        self.groups.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &GroupSeries)> {
        self.groups.iter()
    }

    pub(crate) fn groups(&self) -> &BTreeMap<GroupKey, GroupSeries> {
        &self.groups
    }

    pub fn layers(&self) -> &LayerAssignment {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Copy of the store with both roles of every filter restricted to `period`.
    pub fn truncated(&self, period: &Period) -> GroupedSeriesStore {
        let groups = self
            .groups
            .iter()
            .map(|(key, group)| {
                let observed = group.observed.truncate(Some(period.start), Some(period.end));
                let simulated = group.simulated.truncate(Some(period.start), Some(period.end));
                (key.clone(), GroupSeries::new(observed, simulated))
            })
            .collect();

        GroupedSeriesStore {
            groups,
            layers: self.layers.clone(),
        }
    }
}

fn collect_by_group<I>(records: I) -> BTreeMap<GroupKey, TimeSeries>
where
    I: IntoIterator<Item = (GroupKey, NaiveDateTime, f64)>,
{
    let mut pairs: BTreeMap<GroupKey, Vec<(NaiveDateTime, f64)>> = BTreeMap::new();
    for (key, t, v) in records {
        pairs.entry(key).or_default().push((t, v));
    }
    pairs
        .into_iter()
        .map(|(key, pairs)| (key, TimeSeries::from_unsorted(pairs)))
        .collect()
}
