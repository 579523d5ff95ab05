//! Run configuration.
//!
//! A TOML document such as
//!
//! ```toml
//! [period]
//! start = "2010-01-01T00:00:00"
//! end = "2019-12-31T23:59:59"
//!
//! [gxg]
//! fill_method = "ffill"
//! limit = "unlimited"
//! output = "yearly"
//!
//! [quantiles]
//! ghg = 0.9
//! ```
//!
//! Every section is optional. Names are resolved while parsing, so an
//! unknown fill method or output option fails at load time.

use crate::core::Period;
use crate::error::{Result, StatsError};
use crate::gxg::params::validate_quantile;
use crate::gxg::{GxgParams, QuantileParams, DEFAULT_GHG_QUANTILE, DEFAULT_GLG_QUANTILE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quantiles used by the quantile estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileConfig {
    pub ghg: f64,
    pub glg: f64,
}

impl Default for QuantileConfig {
    fn default() -> Self {
        Self {
            ghg: DEFAULT_GHG_QUANTILE,
            glg: DEFAULT_GLG_QUANTILE,
        }
    }
}

/// Settings of one statistics run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Analysis period applied to both observed and simulated series.
    pub period: Option<Period>,
    pub gxg: GxgParams,
    pub quantiles: QuantileConfig,
}

impl StatisticsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StatisticsConfig =
            toml::from_str(content).map_err(|e| StatsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StatsError::Config(format!("{}: {}", path.display(), e)))?;
        log::info!("reading configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(period) = &self.period {
            period.validate()?;
        }
        self.gxg.validate()?;
        validate_quantile(self.quantiles.ghg)?;
        validate_quantile(self.quantiles.glg)?;
        Ok(())
    }

    /// Quantile estimator parameters for GHG, sharing the classic time window.
    pub fn ghg_quantile_params(&self) -> QuantileParams {
        QuantileParams::default()
            .with_window(self.gxg.tmin, self.gxg.tmax)
            .with_quantile(self.quantiles.ghg)
    }

    /// Quantile estimator parameters for GLG, sharing the classic time window.
    pub fn glg_quantile_params(&self) -> QuantileParams {
        QuantileParams::default()
            .with_window(self.gxg.tmin, self.gxg.tmax)
            .with_quantile(self.quantiles.glg)
    }

    /// Quantile estimator parameters for GVG (no quantile involved).
    pub fn gvg_quantile_params(&self) -> QuantileParams {
        QuantileParams::default().with_window(self.gxg.tmin, self.gxg.tmax)
    }
}
