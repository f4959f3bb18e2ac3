// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Batch configuration.
//!
//! The configuration is a JSON object. Only the three directories are
//! required:
//!
//! ```json
//! {
//!     "log_dir": "logs",
//!     "dataset_dir": "instances",
//!     "optimal_dataset_dir": "optima"
//! }
//! ```

use crate::cli::Args;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

/// The error type for loading and validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration is not valid JSON or misses a required key.
    Parse(serde_json::Error),
    /// A value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_subsets() -> Vec<String> {
    vec!["large_scale".to_owned(), "low-dimensional".to_owned()]
}

fn default_time_limit_seconds() -> f64 {
    600.0
}

fn default_clock_check_interval() -> u64 {
    4096
}

fn default_fptas_epsilon() -> f64 {
    0.5
}

/// Everything a batch run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Directory receiving the log files.
    pub log_dir: PathBuf,
    /// Directory holding one sub-directory of instance files per subset.
    pub dataset_dir: PathBuf,
    /// Directory holding one `<subset>-optimum` sub-directory per subset.
    pub optimal_dataset_dir: PathBuf,
    /// Directory receiving the result CSV files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// The subsets to run, in order.
    #[serde(default = "default_subsets")]
    pub subsets: Vec<String>,
    /// Branch-and-bound budget per instance.
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: f64,
    /// Popped nodes between two clock reads of the branch-and-bound.
    #[serde(default = "default_clock_check_interval")]
    pub clock_check_interval: u64,
    #[serde(default = "default_fptas_epsilon")]
    pub fptas_epsilon: f64,
}

impl BenchConfig {
    /// Reads and validates the configuration at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Applies the command line overrides and validates the result.
    pub fn with_overrides(mut self, args: &Args) -> Result<Self, ConfigError> {
        if let Some(time_limit) = args.time_limit {
            self.time_limit_seconds = time_limit;
        }
        if let Some(epsilon) = args.epsilon {
            self.fptas_epsilon = epsilon;
        }
        if !args.subsets.is_empty() {
            self.subsets = args.subsets.clone();
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_limit_seconds.is_finite() || self.time_limit_seconds < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_limit_seconds must be a non-negative number, got {}",
                self.time_limit_seconds
            )));
        }
        if !self.fptas_epsilon.is_finite() || self.fptas_epsilon <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fptas_epsilon must be a positive number, got {}",
                self.fptas_epsilon
            )));
        }
        if self.subsets.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Invalid("subset names must not be empty".to_owned()));
        }
        Ok(())
    }

    /// The branch-and-bound budget per instance.
    pub fn time_limit(&self) -> Duration {
        // validated to be finite and non-negative; saturate on overflow
        Duration::try_from_secs_f64(self.time_limit_seconds).unwrap_or(Duration::MAX)
    }

    /// The directory holding the instance files of `subset`.
    pub fn instances_dir(&self, subset: &str) -> PathBuf {
        self.dataset_dir.join(subset)
    }

    /// The directory holding the optimum files of `subset`.
    pub fn optima_dir(&self, subset: &str) -> PathBuf {
        self.optimal_dataset_dir.join(format!("{}-optimum", subset))
    }
}

impl FromStr for BenchConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: BenchConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const MINIMAL: &str = r#"{
        "log_dir": "logs/",
        "dataset_dir": "data",
        "optimal_dataset_dir": "data"
    }"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: BenchConfig = MINIMAL.parse().unwrap();
        assert_eq!(config.log_dir, PathBuf::from("logs/"));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.subsets, vec!["large_scale", "low-dimensional"]);
        assert_eq!(config.time_limit(), Duration::from_secs(600));
        assert_eq!(config.clock_check_interval, 4096);
        assert_eq!(config.fptas_epsilon, 0.5);
    }

    #[test]
    fn test_subset_directories() {
        let config: BenchConfig = MINIMAL.parse().unwrap();
        assert_eq!(config.instances_dir("large_scale"), PathBuf::from("data/large_scale"));
        assert_eq!(
            config.optima_dir("large_scale"),
            PathBuf::from("data/large_scale-optimum")
        );
    }

    #[test]
    fn test_missing_directory_is_a_parse_error() {
        let err = r#"{ "log_dir": "logs" }"#.parse::<BenchConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let negative = r#"{
            "log_dir": "l", "dataset_dir": "d", "optimal_dataset_dir": "o",
            "time_limit_seconds": -1.0
        }"#;
        assert!(matches!(
            negative.parse::<BenchConfig>(),
            Err(ConfigError::Invalid(_))
        ));

        let zero_epsilon = r#"{
            "log_dir": "l", "dataset_dir": "d", "optimal_dataset_dir": "o",
            "fptas_epsilon": 0.0
        }"#;
        assert!(matches!(
            zero_epsilon.parse::<BenchConfig>(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config: BenchConfig = MINIMAL.parse().unwrap();
        let args = Args::try_parse_from([
            "knapsack-bench",
            "--time-limit",
            "1.5",
            "--epsilon",
            "0.2",
            "--subset",
            "tiny",
        ])
        .unwrap();
        let config = config.with_overrides(&args).unwrap();
        assert_eq!(config.time_limit(), Duration::from_millis(1500));
        assert_eq!(config.fptas_epsilon, 0.2);
        assert_eq!(config.subsets, vec!["tiny"]);

        let args = Args::try_parse_from(["knapsack-bench", "--epsilon=-1"]).unwrap();
        assert!(config.with_overrides(&args).is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let config = BenchConfig::from_path(&path).unwrap();
        assert_eq!(config.dataset_dir, PathBuf::from("data"));

        let err = BenchConfig::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
