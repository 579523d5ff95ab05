//! Summary tables per filter and per model layer.

use super::{error_metrics, ErrorMetrics};
use crate::batch::map_groups;
use crate::core::{GroupKey, LayerAssignment};
use crate::residuals::ResidualSeries;
use std::collections::{BTreeMap, BTreeSet};

/// Summary row of one filter.
pub type SummaryRecord = ErrorMetrics;

/// Summary row of one model layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub layer: i32,
    pub metrics: ErrorMetrics,
    /// Distinct locations with at least one residual in this layer.
    pub nlocations: usize,
    /// Distinct filters with at least one residual in this layer.
    pub nfilters: usize,
}

impl LayerSummary {
    /// Number of residuals pooled in this layer.
    pub fn nresiduals(&self) -> usize {
        self.metrics.count
    }
}

/// One summary row per filter in `residuals`, including filters without residuals.
pub fn summarize_groups(
    residuals: &BTreeMap<GroupKey, ResidualSeries>,
) -> BTreeMap<GroupKey, SummaryRecord> {
    let summary = map_groups(residuals, |_, series| {
        error_metrics(series.residuals(), series.observed())
    });
    log::info!("summarized residuals of {} filters", summary.len());
    summary
}

/// One summary row per layer assigned to any filter in `residuals`.
///
/// Residuals of all filters in a layer are pooled before the metrics are
/// computed. Filters without a layer assignment cannot be placed and are
/// left out of this table.
pub fn summarize_layers(
    residuals: &BTreeMap<GroupKey, ResidualSeries>,
    layers: &LayerAssignment,
) -> BTreeMap<i32, LayerSummary> {
    let mut pooled: BTreeMap<i32, Vec<&GroupKey>> = BTreeMap::new();
    for key in residuals.keys() {
        match layers.layer(key) {
            Some(layer) => pooled.entry(layer).or_default().push(key),
            None => log::warn!("{}: no layer assigned, left out of layer summary", key),
        }
    }

    let summary: BTreeMap<i32, LayerSummary> = map_groups(&pooled, |&layer, keys| {
        let mut r = Vec::new();
        let mut o = Vec::new();
        let mut locations = BTreeSet::new();
        let mut nfilters = 0;

        for key in keys {
            let series = &residuals[*key];
            if series.is_empty() {
                continue;
            }
            r.extend_from_slice(series.residuals());
            o.extend_from_slice(series.observed());
            locations.insert(key.location.as_str());
            nfilters += 1;
        }

        LayerSummary {
            layer,
            metrics: error_metrics(&r, &o),
            nlocations: locations.len(),
            nfilters,
        }
    });
    log::info!("summarized residuals of {} layers", summary.len());
    summary
}
