//! Parameters of the GXG statistics.
//!
//! Fill method and output names are parsed once, here, into closed enums.
//! An unknown name is a caller error and fails immediately.

use crate::error::{Result, StatsError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default quantile for the GHG estimate.
pub const DEFAULT_GHG_QUANTILE: f64 = 0.94;
/// Default quantile for the GLG estimate.
pub const DEFAULT_GLG_QUANTILE: f64 = 0.06;
/// Default maximum number of consecutive days filled.
pub const DEFAULT_FILL_LIMIT: usize = 15;

/// Interpolation scheme for filling missing days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationKind {
    /// Straight line between the neighbouring known days.
    Linear,
    /// Value of the closer neighbouring known day (earlier one on ties).
    Nearest,
}

/// How missing days of the daily series are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FillMethod {
    /// Drop missing days.
    None,
    /// Propagate the last known value forward.
    ForwardFill,
    /// Propagate the next known value backward.
    BackwardFill,
    /// Interpolate between known values.
    Interpolate(InterpolationKind),
}

impl FromStr for FillMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(FillMethod::None),
            "ffill" | "pad" | "forward_fill" => Ok(FillMethod::ForwardFill),
            "bfill" | "backfill" | "backward_fill" => Ok(FillMethod::BackwardFill),
            // On a regular daily grid time- and index-weighted interpolation equal linear.
            "linear" | "time" | "index" => Ok(FillMethod::Interpolate(InterpolationKind::Linear)),
            "nearest" => Ok(FillMethod::Interpolate(InterpolationKind::Nearest)),
            _ => Err(StatsError::UnknownFillMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for FillMethod {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FillMethod::None => "none",
            FillMethod::ForwardFill => "ffill",
            FillMethod::BackwardFill => "bfill",
            FillMethod::Interpolate(InterpolationKind::Linear) => "linear",
            FillMethod::Interpolate(InterpolationKind::Nearest) => "nearest",
        };
        f.write_str(name)
    }
}

impl From<FillMethod> for String {
    fn from(method: FillMethod) -> Self {
        method.to_string()
    }
}

/// Shape of a classic GXG result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Output {
    /// One value per calendar year.
    Yearly,
    /// Mean of the yearly values.
    #[default]
    Mean,
}

impl FromStr for Output {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yearly" => Ok(Output::Yearly),
            "mean" => Ok(Output::Mean),
            _ => Err(StatsError::UnknownOutput(s.to_string())),
        }
    }
}

impl TryFrom<String> for Output {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Yearly => f.write_str("yearly"),
            Output::Mean => f.write_str("mean"),
        }
    }
}

impl From<Output> for String {
    fn from(output: Output) -> Self {
        output.to_string()
    }
}

/// Parameters of the classic GXG pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GxgParams {
    /// Start of the evaluated window (inclusive).
    pub tmin: Option<NaiveDateTime>,
    /// End of the evaluated window (inclusive).
    pub tmax: Option<NaiveDateTime>,
    pub fill_method: FillMethod,
    /// Maximum consecutive days filled; `None` fills every gap completely.
    #[serde(deserialize_with = "deserialize_limit")]
    pub limit: Option<usize>,
    pub output: Output,
}

impl Default for GxgParams {
    fn default() -> Self {
        Self {
            tmin: None,
            tmax: None,
            fill_method: FillMethod::Interpolate(InterpolationKind::Linear),
            limit: Some(DEFAULT_FILL_LIMIT),
            output: Output::Mean,
        }
    }
}

impl GxgParams {
    pub fn with_window(mut self, tmin: Option<NaiveDateTime>, tmax: Option<NaiveDateTime>) -> Self {
        self.tmin = tmin;
        self.tmax = tmax;
        self
    }

    pub fn with_fill(mut self, fill_method: FillMethod, limit: Option<usize>) -> Self {
        self.fill_method = fill_method;
        self.limit = limit;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_window(self.tmin, self.tmax)?;
        if self.limit == Some(0) {
            return Err(StatsError::InvalidParameter(
                "limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the quantile estimators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileParams {
    pub tmin: Option<NaiveDateTime>,
    pub tmax: Option<NaiveDateTime>,
    /// Quantile override; `None` uses the statistic's default. Ignored for GVG.
    pub q: Option<f64>,
}

impl QuantileParams {
    pub fn with_window(mut self, tmin: Option<NaiveDateTime>, tmax: Option<NaiveDateTime>) -> Self {
        self.tmin = tmin;
        self.tmax = tmax;
        self
    }

    pub fn with_quantile(mut self, q: f64) -> Self {
        self.q = Some(q);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_window(self.tmin, self.tmax)?;
        if let Some(q) = self.q {
            validate_quantile(q)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_quantile(q: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::InvalidParameter(format!(
            "quantile {} outside [0, 1]",
            q
        )));
    }
    Ok(())
}

fn validate_window(tmin: Option<NaiveDateTime>, tmax: Option<NaiveDateTime>) -> Result<()> {
    if let (Some(start), Some(end)) = (tmin, tmax) {
        if end < start {
            return Err(StatsError::InvalidParameter(format!(
                "tmax {} lies before tmin {}",
                end, start
            )));
        }
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Steps(usize),
    Keyword(String),
}

/// Accepts a step count or the keyword `"unlimited"`.
fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawLimit::deserialize(deserializer)? {
        RawLimit::Steps(n) => Ok(Some(n)),
        RawLimit::Keyword(k) if k.eq_ignore_ascii_case("unlimited") || k.eq_ignore_ascii_case("none") => {
            Ok(None)
        }
        RawLimit::Keyword(k) => Err(serde::de::Error::custom(format!(
            "invalid limit {:?}, expected a step count or \"unlimited\"",
            k
        ))),
    }
}
