//! Gap filling of daily series.
//!
//! `limit` caps the number of consecutive missing steps filled per gap,
//! counted from the side the fill starts at. Steps beyond the limit stay
//! missing. `None` fills the whole gap.

use super::params::{FillMethod, InterpolationKind};
use super::resample::DailySeries;

/// Apply a fill method to a daily series.
///
/// `FillMethod::None` drops the missing days instead of filling them.
pub fn fill_daily(series: &DailySeries, method: FillMethod, limit: Option<usize>) -> DailySeries {
    match method {
        FillMethod::None => series.retain_known(|_| true),
        FillMethod::ForwardFill => series.with_values(forward_fill(series.values(), limit)),
        FillMethod::BackwardFill => series.with_values(backward_fill(series.values(), limit)),
        FillMethod::Interpolate(kind) => {
            series.with_values(interpolate(series.values(), kind, limit))
        }
    }
}

/// Propagate the last known value forward over at most `limit` steps.
pub fn forward_fill(values: &[f64], limit: Option<usize>) -> Vec<f64> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut result = Vec::with_capacity(values.len());
    let mut last_valid = None;
    let mut run = 0usize;

    for &v in values {
        if v.is_nan() {
            run += 1;
            match last_valid {
                Some(fill) if run <= limit => result.push(fill),
                _ => result.push(v),
            }
        } else {
            last_valid = Some(v);
            run = 0;
            result.push(v);
        }
    }

    result
}

/// Propagate the next known value backward over at most `limit` steps.
pub fn backward_fill(values: &[f64], limit: Option<usize>) -> Vec<f64> {
    let reversed: Vec<f64> = values.iter().rev().copied().collect();
    let mut result = forward_fill(&reversed, limit);
    result.reverse();
    result
}

/// Interpolate gaps, filling at most `limit` steps from the start of each gap.
///
/// Leading gaps are left missing. A trailing gap is filled forward with the
/// last known value for `Linear` and left missing for `Nearest`.
pub fn interpolate(values: &[f64], kind: InterpolationKind, limit: Option<usize>) -> Vec<f64> {
    let mut result = values.to_vec();
    let n = result.len();
    let limit = limit.unwrap_or(usize::MAX);

    let mut i = 0;
    while i < n {
        if !result[i].is_nan() {
            i += 1;
            continue;
        }

        let start = i;
        while i < n && result[i].is_nan() {
            i += 1;
        }
        let end = i;

        if start == 0 {
            continue;
        }

        let left = result[start - 1];
        if end == n {
            if kind == InterpolationKind::Linear {
                result[start..end].iter_mut().take(limit).for_each(|v| *v = left);
            }
            continue;
        }

        let right = result[end];
        let gap = end - start;
        for (j, idx) in (start..end).enumerate().take(limit) {
            result[idx] = match kind {
                InterpolationKind::Linear => {
                    let t = (j + 1) as f64 / (gap + 1) as f64;
                    left + t * (right - left)
                }
                InterpolationKind::Nearest => {
                    if j + 1 <= gap - j {
                        left
                    } else {
                        right
                    }
                }
            };
        }
    }

    result
}
