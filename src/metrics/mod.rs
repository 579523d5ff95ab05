//! Error statistics of residuals against observations.
//!
//! Every metric is NaN when it cannot be computed from the data at hand
//! (no residuals, or too few values for a variance). Nothing here fails.

mod summary;

pub use summary::{summarize_groups, summarize_layers, LayerSummary, SummaryRecord};

use crate::utils::stats::{mean, variance};

/// Error metrics of one set of residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorMetrics {
    /// Mean of the residuals (bias).
    pub mean_error: f64,
    /// Mean of the absolute residuals.
    pub mean_absolute_error: f64,
    /// Square root of the mean squared residual.
    pub root_mean_square_error: f64,
    /// Sum of squared residuals.
    pub sum_of_squared_errors: f64,
    /// Share of the observed variance explained, in percent.
    pub explained_variance_percentage: f64,
    /// Number of residuals.
    pub count: usize,
}

impl ErrorMetrics {
    /// Metrics for an empty residual set.
    pub fn empty() -> Self {
        Self {
            mean_error: f64::NAN,
            mean_absolute_error: f64::NAN,
            root_mean_square_error: f64::NAN,
            sum_of_squared_errors: f64::NAN,
            explained_variance_percentage: f64::NAN,
            count: 0,
        }
    }
}

/// Calculate all metrics from residuals and the observations paired with them.
///
/// # Arguments
/// * `residuals` - Simulated minus observed values
/// * `observed` - Observed values used for the explained variance
pub fn error_metrics(residuals: &[f64], observed: &[f64]) -> ErrorMetrics {
    if residuals.is_empty() {
        return ErrorMetrics::empty();
    }

    ErrorMetrics {
        mean_error: mean_error(residuals),
        mean_absolute_error: mean_absolute_error(residuals),
        root_mean_square_error: root_mean_square_error(residuals),
        sum_of_squared_errors: sum_of_squared_errors(residuals),
        explained_variance_percentage: explained_variance_percentage(observed, residuals),
        count: residuals.len(),
    }
}

pub fn mean_error(residuals: &[f64]) -> f64 {
    mean(residuals)
}

pub fn mean_absolute_error(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return f64::NAN;
    }
    residuals.iter().map(|r| r.abs()).sum::<f64>() / residuals.len() as f64
}

pub fn root_mean_square_error(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return f64::NAN;
    }
    (residuals.iter().map(|r| r.powi(2)).sum::<f64>() / residuals.len() as f64).sqrt()
}

pub fn sum_of_squared_errors(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return f64::NAN;
    }
    residuals.iter().map(|r| r.powi(2)).sum()
}

/// Explained variance percentage: `(var(o) - var(r)) / var(o) * 100`.
///
/// Uses sample variances (n-1). NaN when the observed variance is zero or
/// undefined.
pub fn explained_variance_percentage(observed: &[f64], residuals: &[f64]) -> f64 {
    let var_observed = variance(observed);
    if !var_observed.is_finite() || var_observed == 0.0 {
        return f64::NAN;
    }
    (var_observed - variance(residuals)) / var_observed * 100.0
}
