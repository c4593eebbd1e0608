//! effortmap - migration effort points per file
//!
//! A CLI tool that scores every file of an analysis run by summing the
//! effort of its classifications and inline hints, and writes a Markdown
//! or JSON effort report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, snapshot, scoring or render failure)

mod analysis;
mod cli;
mod config;
mod error;
mod graph;
mod models;
mod report;
mod scoring;
mod template;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use graph::{AnalysisContext, AnalysisSnapshot};
use models::FileUnit;
use std::path::{Path, PathBuf};
use template::{effort_for_file::METHOD_NAME, RenderPass, TemplateValue};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // No logging needed for --init-config
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Loaded before logging so `[general] verbose` can set the level
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("effortmap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(args, config) {
        error!("Scoring failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .effortmap.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        anyhow::bail!("{} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
    }

    std::fs::write(path, Config::default_toml()?)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

fn run(args: Args, config: Config) -> Result<()> {
    let input = args
        .input
        .clone()
        .context("An analysis snapshot is required (--input)")?;

    let snapshot = AnalysisSnapshot::load(&input)?;
    let ctx = AnalysisContext::from_snapshot(snapshot)
        .with_context(|| format!("Invalid analysis snapshot: {}", input.display()))?;
    info!(
        "Loaded analysis run '{}' with {} files",
        ctx.run_id(),
        ctx.graph().file_count()
    );

    let filter = config.scoring.tag_filter();

    // Each render gets its own pass bound to this run.
    let pass = RenderPass::new(&ctx, &filter);

    if let Some(ref file_id) = args.file {
        let points = pass
            .call(METHOD_NAME, &[TemplateValue::from(FileUnit::new(file_id.clone()))])?
            .as_number()
            .context("Effort method returned a non-numeric value")?;
        println!("{}", points);
        return Ok(());
    }

    let report = report::build_report(&ctx, &filter, &input.display().to_string())?;

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&report, &pass, config.report.top_files)?
        }
    };

    let output_path = PathBuf::from(&config.report.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("Files scored: {}", report.summary.files);
        println!("Total effort: {} points", report.summary.total_effort);
        println!("Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Runs before the tracing subscriber is installed, so problems go to stderr.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("Warning: failed to load {}: {:#}", DEFAULT_CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}
