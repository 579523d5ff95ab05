//! End-to-end evaluation of a store: residuals, summaries and GXG tables.

use crate::config::StatisticsConfig;
use crate::core::{GroupKey, GroupedSeriesStore};
use crate::error::Result;
use crate::gxg::{compare_groups, GxgComparison, GxgMethod, GxgStatistic};
use crate::metrics::{summarize_groups, summarize_layers, LayerSummary, SummaryRecord};
use crate::residuals::{compute_residuals, ResidualSeries};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Residuals and their summary tables.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub residuals: BTreeMap<GroupKey, ResidualSeries>,
    /// One row per filter in the store.
    pub summary: BTreeMap<GroupKey, SummaryRecord>,
    /// One row per assigned layer.
    pub summary_by_layer: BTreeMap<i32, LayerSummary>,
}

/// GXG estimation method family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodKind {
    Classic,
    Quantile,
}

/// GXG comparisons keyed by statistic and method, then by filter.
pub type GxgTables = BTreeMap<(GxgStatistic, MethodKind), BTreeMap<GroupKey, GxgComparison>>;

fn within_period<'a>(store: &'a GroupedSeriesStore, config: &StatisticsConfig) -> Cow<'a, GroupedSeriesStore> {
    match &config.period {
        Some(period) => {
            log::info!("restricting series to {} .. {}", period.start, period.end);
            Cow::Owned(store.truncated(period))
        }
        None => Cow::Borrowed(store),
    }
}

/// Compute residuals and the per-filter and per-layer summaries.
pub fn evaluate(store: &GroupedSeriesStore, config: &StatisticsConfig) -> Result<EvaluationReport> {
    config.validate()?;
    let store = within_period(store, config);

    log::info!("calculating residuals for {} filters", store.len());
    let residuals = compute_residuals(&store);
    let summary = summarize_groups(&residuals);
    let summary_by_layer = summarize_layers(&residuals, store.layers());

    Ok(EvaluationReport {
        residuals,
        summary,
        summary_by_layer,
    })
}

/// Compare GHG, GLG and GVG by both methods for every filter.
pub fn gxg_tables(store: &GroupedSeriesStore, config: &StatisticsConfig) -> Result<GxgTables> {
    config.validate()?;
    let store = within_period(store, config);

    let mut tables = GxgTables::new();
    for statistic in [GxgStatistic::Ghg, GxgStatistic::Glg, GxgStatistic::Gvg] {
        let quantile_params = match statistic {
            GxgStatistic::Ghg => config.ghg_quantile_params(),
            GxgStatistic::Glg => config.glg_quantile_params(),
            GxgStatistic::Gvg => config.gvg_quantile_params(),
        };

        let classic = compare_groups(&store, statistic, &GxgMethod::Classic(config.gxg))?;
        tables.insert((statistic, MethodKind::Classic), classic);

        let quantile = compare_groups(&store, statistic, &GxgMethod::Quantile(quantile_params))?;
        tables.insert((statistic, MethodKind::Quantile), quantile);
    }

    Ok(tables)
}
