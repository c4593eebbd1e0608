//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.effortmap.toml` files.

use crate::cli::OutputFormat;
use crate::scoring::TagFilter;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".effortmap.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Scoring settings.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Rows in the highest-effort table.
    #[serde(default = "default_top_files")]
    pub top_files: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
            top_files: default_top_files(),
        }
    }
}

fn default_output() -> String {
    "effort_report.md".to_string()
}

fn default_top_files() -> usize {
    10
}

/// Which classifications and hints count toward effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub include_tags: Vec<String>,

    #[serde(default)]
    pub exclude_tags: Vec<String>,
}

impl ScoringConfig {
    pub fn tag_filter(&self) -> TagFilter {
        TagFilter::new(self.include_tags.clone(), self.exclude_tags.clone())
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.effortmap.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, and only
    /// when the CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(top) = args.top {
            self.report.top_files = top;
        }

        if !args.include_tags.is_empty() {
            self.scoring.include_tags = args.include_tags.clone();
        }
        if !args.exclude_tags.is_empty() {
            self.scoring.exclude_tags = args.exclude_tags.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.output, "effort_report.md");
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(config.report.top_files, 10);
        assert_eq!(config.scoring.tag_filter(), TagFilter::default());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[report]
output = "custom.json"
format = "json"

[scoring]
exclude_tags = ["logging"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.report.output, "custom.json");
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.top_files, 10);
        assert_eq!(config.scoring.exclude_tags, vec!["logging"]);
    }

    #[test]
    fn test_merge_with_args_only_overrides_explicit_values() {
        let mut config = Config::default();
        config.scoring.exclude_tags = vec!["logging".to_string()];

        let args = Args::try_parse_from([
            "effortmap",
            "--input",
            "analysis.json",
            "--format",
            "json",
            "--include-tag",
            "ejb",
        ])
        .unwrap();
        config.merge_with_args(&args);

        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.output, "effort_report.md");
        assert_eq!(config.scoring.include_tags, vec!["ejb"]);
        assert_eq!(config.scoring.exclude_tags, vec!["logging"]);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[report]\ntop_files = 3\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.report.top_files, 3);
    }

    #[test]
    fn test_verbose_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[general]\nverbose = true\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(config.general.verbose);

        let args = Args::try_parse_from(["effortmap", "--input", "analysis.json"]).unwrap();
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[scoring]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.top_files, 10);
    }
}
