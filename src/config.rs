//! Параметры командной строки и конфигурация пайплайна

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::preprocessing::ColumnGroups;
use crate::validation::DEFAULT_MISSING_THRESHOLD;

pub const RAW_TRAIN_FILE: &str = "satisfaction_train.csv";
pub const RAW_TEST_FILE: &str = "satisfaction_test.csv";
pub const PROCESSED_TRAIN_FILE: &str = "scaled_satisfaction_train.csv";
pub const PROCESSED_TEST_FILE: &str = "scaled_satisfaction_test.csv";
pub const PREPROCESSOR_FILE: &str = "preprocessor.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "satisfaction-prep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clean, validate, split and scale the passenger satisfaction dataset")]
pub struct Args {
    /// Path to the raw data CSV
    #[arg(long, alias = "raw_data")]
    pub raw_data: PathBuf,

    /// Proportion of rows allocated to the test set
    #[arg(long, alias = "test_size", default_value_t = 0.2)]
    pub test_size: f64,

    /// Directory where raw/ and processed/ splits are saved
    #[arg(long, alias = "data_to")]
    pub data_to: PathBuf,

    /// Directory where the fitted preprocessor is saved as versioned JSON
    /// (preprocessor.json, replacing the former preprocessor.pickle)
    #[arg(long, alias = "preprocessor_to")]
    pub preprocessor_to: PathBuf,

    /// Random seed for the split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maximum fraction of missing values allowed per column
    #[arg(long, alias = "missing_threshold", default_value_t = DEFAULT_MISSING_THRESHOLD)]
    pub missing_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub raw_data: PathBuf,
    pub test_size: f64,
    pub data_to: PathBuf,
    pub preprocessor_to: PathBuf,
    pub seed: u64,
    pub missing_threshold: f64,
    pub groups: ColumnGroups,
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        Self {
            raw_data: args.raw_data,
            test_size: args.test_size,
            data_to: args.data_to,
            preprocessor_to: args.preprocessor_to,
            seed: args.seed,
            missing_threshold: args.missing_threshold,
            groups: ColumnGroups::satisfaction(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(PrepError::Config(format!(
                "missing threshold must be in [0, 1], got {}",
                self.missing_threshold
            )));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PrepError::Config(format!(
                "test size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data_to.join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.data_to.join("processed")
    }

    pub fn preprocessor_path(&self) -> PathBuf {
        self.preprocessor_to.join(PREPROCESSOR_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from([
            "satisfaction-prep",
            "--raw-data",
            "data/airline.csv",
            "--data-to",
            "out",
            "--preprocessor-to",
            "models",
        ])
        .unwrap();
        assert_eq!(args.test_size, 0.2);
        assert_eq!(args.seed, 42);
        assert_eq!(args.missing_threshold, 0.05);
    }

    #[test]
    fn accepts_underscore_flags() {
        let args = Args::try_parse_from([
            "satisfaction-prep",
            "--raw_data",
            "a.csv",
            "--test_size",
            "0.3",
            "--data_to",
            "out",
            "--preprocessor_to",
            "models",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = PipelineConfig::from(args);
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.raw_dir(), PathBuf::from("out/raw"));
        assert_eq!(config.processed_dir(), PathBuf::from("out/processed"));
        assert_eq!(config.preprocessor_path(), PathBuf::from("models/preprocessor.json"));
    }

    #[test]
    fn resolved_config_serializes() {
        let args = Args::try_parse_from([
            "satisfaction-prep",
            "--raw-data",
            "a.csv",
            "--data-to",
            "out",
            "--preprocessor-to",
            "m",
        ])
        .unwrap();
        let config = PipelineConfig::from(args);
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn help_names_preprocessor_file() {
        use clap::CommandFactory;
        let mut help = Vec::new();
        Args::command().write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains(PREPROCESSOR_FILE));
    }

    #[test]
    fn raw_data_is_required() {
        let result = Args::try_parse_from(["satisfaction-prep", "--data-to", "out", "--preprocessor-to", "m"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_fractions() {
        let mut config = PipelineConfig::from(
            Args::try_parse_from([
                "satisfaction-prep",
                "--raw-data",
                "a.csv",
                "--data-to",
                "out",
                "--preprocessor-to",
                "m",
            ])
            .unwrap(),
        );
        assert!(config.validate().is_ok());
        config.test_size = 1.0;
        assert!(matches!(config.validate(), Err(PrepError::Config(_))));
        config.test_size = 0.2;
        config.missing_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
