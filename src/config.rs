use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const GAMMA: f64 = 0.9;
pub const MAX_ITER: usize = 50;
pub const THRESHOLD: f64 = 1e-4;
pub const DECIMALS: u32 = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub evaluation: EvalConfig,
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// Constants of the evaluation loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
  /// Discount factor
  #[serde(default = "default_gamma")]
  pub gamma: f64,
  /// Hard cap on the number of sweeps
  #[serde(default = "default_max_iter")]
  pub max_iter: usize,
  /// Converged once the largest change of a sweep falls below this
  #[serde(default = "default_threshold")]
  pub threshold: f64,
  /// Values are rounded to this many decimal digits after every sweep
  #[serde(default = "default_decimals")]
  pub decimals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
  /// Filter used when `RUST_LOG` is not set
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_gamma() -> f64 { GAMMA }
fn default_max_iter() -> usize { MAX_ITER }
fn default_threshold() -> f64 { THRESHOLD }
fn default_decimals() -> u32 { DECIMALS }
fn default_log_level() -> String { "info".to_string() }

impl Default for EvalConfig {
  fn default() -> Self {
    Self {
      gamma: default_gamma(),
      max_iter: default_max_iter(),
      threshold: default_threshold(),
      decimals: default_decimals(),
    }
  }
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self { level: default_log_level() }
  }
}

impl EvalConfig {
  pub fn validate(&self) -> Result<()> {
    if !(0.0..1.0).contains(&self.gamma) {
      return Err(Error::Config(format!("gamma must lie in [0, 1), got {}", self.gamma)));
    }
    if self.max_iter == 0 {
      return Err(Error::Config("max_iter must be positive".to_string()));
    }
    if !(self.threshold > 0.0) {
      return Err(Error::Config(format!("threshold must be positive, got {}", self.threshold)));
    }
    if self.decimals > 15 {
      return Err(Error::Config(format!("at most 15 decimals are representable, got {}", self.decimals)));
    }
    Ok(())
  }

  /// Rounds half away from zero to `decimals` digits.
  pub fn round(&self, value: f64) -> f64 {
    let scale = 10f64.powi(self.decimals as i32);
    (value * scale).round() / scale
  }
}

impl Config {
  /// Reads a TOML file, or returns the defaults when no path is given.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Config::default());
    };
    let contents = fs::read_to_string(path)
      .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    Self::parse(&contents)
  }

  /// Loads the configuration, then installs `env_logger` with
  /// `logging.level` as the filter used when `RUST_LOG` is unset.
  pub fn setup(path: Option<&Path>) -> Result<Self> {
    let config = Self::load(path)?;
    // a logger installed earlier in the process stays in place
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
      .try_init();
    if let Some(path) = path {
      info!("loaded configuration from {}", path.display());
    }
    Ok(config)
  }

  pub fn parse(contents: &str) -> Result<Self> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
    config.evaluation.validate()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let config = Config::default().evaluation;
    assert_eq!(config.gamma, 0.9);
    assert_eq!(config.max_iter, 50);
    assert_eq!(config.threshold, 1e-4);
    assert_eq!(config.decimals, 2);
  }

  #[test]
  fn partial_file_keeps_defaults() {
    let config = Config::parse("[evaluation]\nmax_iter = 200\n").unwrap();
    assert_eq!(config.evaluation.max_iter, 200);
    assert_eq!(config.evaluation.gamma, GAMMA);
    assert_eq!(config.logging.level, "info");
  }

  #[test]
  fn empty_file_is_default() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.evaluation, EvalConfig::default());
  }

  #[test]
  fn rejects_bad_values() {
    assert!(matches!(Config::parse("[evaluation]\ngamma = 1.0\n"), Err(Error::Config(_))));
    assert!(matches!(Config::parse("[evaluation]\nmax_iter = 0\n"), Err(Error::Config(_))));
    assert!(matches!(Config::parse("[evaluation]\nthreshold = -1.0\n"), Err(Error::Config(_))));
    assert!(matches!(Config::parse("[evaluation]\nthreshold = 0.0\n"), Err(Error::Config(_))));
    assert!(matches!(Config::parse("[evaluation\n"), Err(Error::Config(_))));
  }

  #[test]
  fn missing_file_is_an_error() {
    let result = Config::load(Some(Path::new("/nonexistent/gridvalue.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(Config::load(None).is_ok());
  }

  #[test]
  fn rounding() {
    let config = EvalConfig::default();
    assert_eq!(config.round(-1.9), -1.9);
    assert_eq!(config.round(-3.439), -3.44);
    assert_eq!(config.round(-9.964), -9.96);
    assert_eq!(config.round(0.0), 0.0);
  }
}
