//! Simulated versus observed GXG.

use super::params::{GxgParams, QuantileParams};
use super::{classic, quantile, GxgValue};
use crate::batch::map_groups;
use crate::core::{GroupKey, GroupedSeriesStore, TimeSeries};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;

/// Which groundwater level statistic to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GxgStatistic {
    Ghg,
    Glg,
    Gvg,
}

impl fmt::Display for GxgStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GxgStatistic::Ghg => f.write_str("GHG"),
            GxgStatistic::Glg => f.write_str("GLG"),
            GxgStatistic::Gvg => f.write_str("GVG"),
        }
    }
}

/// Estimation method with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GxgMethod {
    Classic(GxgParams),
    Quantile(QuantileParams),
}

impl GxgMethod {
    pub fn validate(&self) -> Result<()> {
        match self {
            GxgMethod::Classic(params) => params.validate(),
            GxgMethod::Quantile(params) => params.validate(),
        }
    }
}

/// Observed and simulated value of a statistic and their difference.
#[derive(Debug, Clone, PartialEq)]
pub struct GxgComparison {
    pub observed: GxgValue,
    pub simulated: GxgValue,
    /// Simulated minus observed.
    pub difference: GxgValue,
}

/// Compute one statistic of a series.
pub fn evaluate(statistic: GxgStatistic, method: &GxgMethod, series: &TimeSeries) -> Result<GxgValue> {
    method.validate()?;
    Ok(evaluate_validated(statistic, method, series))
}

/// Simulated minus observed statistic, both computed with the same parameters.
///
/// NaN when either side is undefined.
pub fn delta(
    statistic: GxgStatistic,
    method: &GxgMethod,
    observed: &TimeSeries,
    simulated: &TimeSeries,
) -> Result<GxgValue> {
    method.validate()?;
    Ok(compare(statistic, method, observed, simulated).difference)
}

/// Compare a statistic for every filter in the store.
///
/// Parameters are validated once up front; per filter the computation
/// cannot fail and undefined values show up as NaN.
pub fn compare_groups(
    store: &GroupedSeriesStore,
    statistic: GxgStatistic,
    method: &GxgMethod,
) -> Result<BTreeMap<GroupKey, GxgComparison>> {
    method.validate()?;
    let comparisons = map_groups(store.groups(), |_, group| {
        compare(statistic, method, &group.observed, &group.simulated)
    });
    log::info!("computed {} for {} filters", statistic, comparisons.len());
    Ok(comparisons)
}

fn compare(
    statistic: GxgStatistic,
    method: &GxgMethod,
    observed: &TimeSeries,
    simulated: &TimeSeries,
) -> GxgComparison {
    let observed = evaluate_validated(statistic, method, observed);
    let simulated = evaluate_validated(statistic, method, simulated);
    let difference = simulated.difference(&observed);
    GxgComparison {
        observed,
        simulated,
        difference,
    }
}

fn evaluate_validated(statistic: GxgStatistic, method: &GxgMethod, series: &TimeSeries) -> GxgValue {
    match method {
        GxgMethod::Classic(params) => match statistic {
            GxgStatistic::Ghg => classic::ghg(series, params),
            GxgStatistic::Glg => classic::glg(series, params),
            GxgStatistic::Gvg => classic::gvg(series, params),
        },
        GxgMethod::Quantile(params) => {
            let value = match statistic {
                GxgStatistic::Ghg => quantile::q_ghg(series, params.tmin, params.tmax, params.q),
                GxgStatistic::Glg => quantile::q_glg(series, params.tmin, params.tmax, params.q),
                GxgStatistic::Gvg => Ok(quantile::q_gvg(series, params.tmin, params.tmax)),
            };
            // The quantile was validated with the method.
            GxgValue::Mean(value.unwrap_or(f64::NAN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::gxg::params::{FillMethod, Output};
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn spring_series(values: &[f64]) -> TimeSeries {
        TimeSeries::from_unsorted(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (at(2018 + i as i32, 3, 28), v)),
        )
    }

    #[test]
    fn delta_is_simulated_minus_observed() {
        let observed = spring_series(&[5.0, 6.0, 7.0]);
        let simulated = spring_series(&[5.5, 6.5, 7.5]);
        let method = GxgMethod::Classic(GxgParams::default().with_fill(FillMethod::None, None));

        let diff = delta(GxgStatistic::Gvg, &method, &observed, &simulated).unwrap();
        assert_relative_eq!(diff.mean(), 0.5, epsilon = 1e-12);

        let yearly = GxgMethod::Classic(
            GxgParams::default()
                .with_fill(FillMethod::None, None)
                .with_output(Output::Yearly),
        );
        let diff = delta(GxgStatistic::Ghg, &yearly, &observed, &simulated).unwrap();
        assert_eq!(diff.yearly().map(|y| y.len()), Some(3));
    }

    #[test]
    fn delta_is_nan_when_one_side_is_undefined() {
        let observed = spring_series(&[5.0]);
        let method = GxgMethod::Quantile(QuantileParams::default());

        let diff = delta(GxgStatistic::Gvg, &method, &observed, &TimeSeries::empty()).unwrap();
        assert!(diff.mean().is_nan());
    }

    #[test]
    fn invalid_method_fails_before_computing() {
        let method = GxgMethod::Quantile(QuantileParams::default().with_quantile(2.0));
        let result = evaluate(GxgStatistic::Ghg, &method, &spring_series(&[1.0]));
        assert!(matches!(result, Err(StatsError::InvalidParameter(_))));

        let store = GroupedSeriesStore::new();
        assert!(compare_groups(&store, GxgStatistic::Glg, &method).is_err());
    }

    #[test]
    fn compare_groups_covers_every_filter() {
        let a = GroupKey::new("A", 1);
        let b = GroupKey::new("B", 1);
        let mut store = GroupedSeriesStore::new();
        store.insert(a.clone(), spring_series(&[1.0, 2.0]), spring_series(&[2.0, 3.0]));
        store.insert(b.clone(), spring_series(&[1.0]), TimeSeries::empty());

        let method = GxgMethod::Quantile(QuantileParams::default());
        let result = compare_groups(&store, GxgStatistic::Gvg, &method).unwrap();

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[&a].observed.mean(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(result[&a].difference.mean(), 1.0, epsilon = 1e-12);
        assert!(result[&b].simulated.mean().is_nan());
        assert!(result[&b].difference.mean().is_nan());
    }
}
