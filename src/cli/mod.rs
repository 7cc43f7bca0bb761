//! # CLI Support
//!
//! Command-line options for running the suite in CI pipelines.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::SuiteConfig;
use crate::error::ConfigError;
use crate::testing::RunMode;

/// Output format for the run report printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "reqres-check")]
#[command(about = "Run end-to-end checks against the ReqRes demo API")]
pub struct CliConfig {
    /// Base URL of the API (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// JSON file with suite settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run all cases concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Report format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Only run cases whose name contains this text (repeatable)
    #[arg(long)]
    pub only: Vec<String>,
}

impl CliConfig {
    /// Suite settings from the config file (or defaults) with command-line
    /// overrides applied.
    pub fn suite_config(&self) -> Result<SuiteConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SuiteConfig::from_file(path)?,
            None => SuiteConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }

    pub fn run_mode(&self) -> RunMode {
        if self.parallel {
            RunMode::Parallel
        } else {
            RunMode::Serial
        }
    }
}
