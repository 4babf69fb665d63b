//! Dashboard configuration.
//!
//! Loaded from a TOML file where every key is optional; anything absent
//! keeps its default. CLI flags are applied on top by the binary.

use crate::error::{DashError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MONTHS: usize = 24;
/// One hundred years of monthly history.
pub const MAX_MONTHS: usize = 1200;
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seed for the synthetic data generator.
    pub seed: u64,
    /// Months of ledger history generated per supplier.
    pub months: usize,
    /// Reference date of the newest ledger month. Today when unset.
    pub as_of: Option<NaiveDate>,
    /// Year the score summaries are computed for. Year of `as_of` when unset.
    pub evaluation_year: Option<i32>,
    /// Suppliers with a supply risk above this count as high risk.
    pub high_risk_threshold: f64,
    pub output_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            seed: DEFAULT_SEED,
            months: DEFAULT_MONTHS,
            as_of: None,
            evaluation_year: None,
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl DashboardConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashError::Config(format!(
                "could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.months == 0 {
            return Err(DashError::Config("months must be at least 1".into()));
        }
        if self.months > MAX_MONTHS {
            return Err(DashError::Config(format!(
                "months must be at most {}, got {}",
                MAX_MONTHS, self.months
            )));
        }
        if !(0.0..=100.0).contains(&self.high_risk_threshold) {
            return Err(DashError::Config(format!(
                "high_risk_threshold must be within 0-100, got {}",
                self.high_risk_threshold
            )));
        }
        Ok(())
    }

    pub fn as_of_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn evaluation_year(&self) -> i32 {
        self.evaluation_year
            .unwrap_or_else(|| self.as_of_date().year())
    }
}
