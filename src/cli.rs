//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// effortmap - migration effort points per file
///
/// Scores every file of an analysis run by summing the effort of its
/// classifications and inline hints, and renders a Markdown or JSON report.
///
/// Examples:
///   effortmap --input analysis.json
///   effortmap --input analysis.toml --format json --output effort.json
///   effortmap --input analysis.json --file src/Foo.java
///   effortmap --input analysis.json --exclude-tag logging
///   effortmap --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Analysis snapshot to score (.json or .toml)
    #[arg(short, long, value_name = "FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting (effort_report.md).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Number of files listed in the highest-effort table
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Only count classifications and hints carrying one of these tags
    #[arg(long = "include-tag", value_name = "TAGS", value_delimiter = ',')]
    pub include_tags: Vec<String>,

    /// Never count classifications and hints carrying these tags
    #[arg(long = "exclude-tag", value_name = "TAGS", value_delimiter = ',')]
    pub exclude_tags: Vec<String>,

    /// Print the effort points of a single file id and exit
    #[arg(long, value_name = "ID")]
    pub file: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .effortmap.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "EFFORTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .effortmap.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        match self.input {
            None => return Err("An analysis snapshot is required (--input)".to_string()),
            Some(ref input) if !input.is_file() => {
                return Err(format!("Analysis snapshot not found: {}", input.display()));
            }
            _ => {}
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        if let Some(tag) = self.include_tags.iter().find(|t| self.exclude_tags.contains(t)) {
            return Err(format!("Tag '{}' is both included and excluded", tag));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `-q` and `-v` win over the config file's `verbose` default.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
