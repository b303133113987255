use crate::error::{ReportError, Result};
use crate::types::ScorePolicy;
use crate::util::DEFAULT_DATE_FORMATS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bridge_report.toml";
pub const DEFAULT_INPUT_FILE: &str = "updated_data.csv";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub input: PathBuf,
    /// Rows in the worst-condition ranking.
    pub top_n: usize,
    /// Standard deviations from the mean before a rating counts as an outlier.
    pub outlier_threshold: f64,
    /// First year of the first aggregation bucket.
    pub base_year: i32,
    pub interval_years: i32,
    pub score_policy: ScorePolicy,
    pub date_formats: Vec<String>,
    /// Rows printed before a table is cut short on the console.
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            top_n: 10,
            outlier_threshold: 2.0,
            base_year: 1960,
            interval_years: 10,
            score_policy: ScorePolicy::Strict,
            date_formats: DEFAULT_DATE_FORMATS.clone(),
            preview_rows: 20,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval_years < 1 {
            return Err(ReportError::config(format!(
                "interval_years must be at least 1, got {}",
                self.interval_years
            )));
        }
        check_threshold(self.outlier_threshold)?;
        if self.date_formats.is_empty() {
            return Err(ReportError::config("date_formats must not be empty"));
        }
        Ok(())
    }
}

/// Outlier thresholds are a non-negative, finite number of standard deviations.
pub fn check_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(ReportError::config(format!(
            "outlier_threshold must be a finite number >= 0, got {}",
            threshold
        )))
    }
}

/// Parse a threshold typed by the user; a decimal comma is accepted.
pub fn parse_threshold(s: &str) -> Result<f64> {
    let value = s
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ReportError::config(format!("`{}` is not a number", s.trim())))?;
    check_threshold(value)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<ReportConfig> {
    let config: ReportConfig = toml::from_str(contents)
        .map_err(|e| ReportError::config(format!("failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, `bridge_report.toml`
/// in the working directory is used if present, and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    match explicit {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let config = parse_config(&contents)?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(path) {
                Ok(contents) => {
                    let config = parse_config(&contents)?;
                    log::debug!("Loaded config from {}", path.display());
                    Ok(config)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(ReportConfig::default())
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
