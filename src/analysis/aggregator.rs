//! Effort aggregation and statistics.
//!
//! [`EffortAggregator`] is the per-file contract: the total for a file is
//! the exact sum of what every bound provider reports. The free functions
//! below build report-level statistics on top of it.

use crate::error::{EffortError, Result};
use crate::graph::AnalysisContext;
use crate::models::{EffortLevel, EffortPoints, EffortSummary, FileEffort, FileUnit, IssueCategory};
use crate::scoring::{default_providers, ScoreProvider, TagFilter};
use std::collections::BTreeMap;
use tracing::debug;

struct Binding {
    ctx: AnalysisContext,
    providers: Vec<Box<dyn ScoreProvider>>,
}

/// Sums per-file effort over a set of score providers bound to one
/// analysis context.
pub struct EffortAggregator {
    binding: Option<Binding>,
}

impl EffortAggregator {
    /// An aggregator with no providers. Every `compute` fails until it is
    /// replaced by a bound one.
    pub fn unbound() -> Self {
        Self { binding: None }
    }

    /// Bind the default classification and hint providers to `ctx`.
    pub fn bind(ctx: &AnalysisContext, filter: &TagFilter) -> Self {
        Self::with_providers(ctx, default_providers(ctx, filter))
    }

    /// Bind an explicit provider set. The providers must have been built
    /// from the same `ctx`.
    pub fn with_providers(ctx: &AnalysisContext, providers: Vec<Box<dyn ScoreProvider>>) -> Self {
        debug!(
            "Binding {} score providers to run '{}'",
            providers.len(),
            ctx.run_id()
        );
        Self {
            binding: Some(Binding {
                ctx: ctx.clone(),
                providers,
            }),
        }
    }

    #[allow(dead_code)] // Host-side introspection
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Names of the bound providers, in registration order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.binding
            .as_ref()
            .map(|b| b.providers.iter().map(|p| p.name()).collect())
            .unwrap_or_default()
    }

    /// Total migration effort for `file`.
    pub fn compute(&self, file: &FileUnit) -> Result<EffortPoints> {
        self.breakdown(file).map(|b| b.total)
    }

    /// Per-provider contributions and total for `file`.
    pub fn breakdown(&self, file: &FileUnit) -> Result<FileEffort> {
        let binding = self.binding.as_ref().ok_or_else(|| {
            EffortError::Configuration(
                "score providers are not bound to an analysis context".to_string(),
            )
        })?;

        if binding.providers.is_empty() {
            return Err(EffortError::Configuration(
                "no score providers registered".to_string(),
            ));
        }

        let node = binding.ctx.resolve(file).ok_or_else(|| {
            EffortError::InvalidArgument(format!(
                "file '{}' is not part of analysis run '{}'",
                file,
                binding.ctx.run_id()
            ))
        })?;

        let mut contributions = BTreeMap::new();
        let mut total: EffortPoints = 0;
        for provider in &binding.providers {
            let points = provider.score(file)?;
            total = total
                .checked_add(points)
                .ok_or_else(|| EffortError::Overflow(file.id().to_string()))?;
            *contributions.entry(provider.name().to_string()).or_insert(0) += points;
        }

        Ok(FileEffort {
            file: file.clone(),
            path: node.path.clone(),
            contributions,
            total,
        })
    }
}

/// Score every file, stopping at the first failure.
pub fn effort_by_file(aggregator: &EffortAggregator, files: &[FileUnit]) -> Result<Vec<FileEffort>> {
    files.iter().map(|f| aggregator.breakdown(f)).collect()
}

/// Sum of all per-file totals.
pub fn total_effort(files: &[FileEffort]) -> Result<EffortPoints> {
    files.iter().try_fold(0u64, |acc, f| {
        acc.checked_add(f.total)
            .ok_or_else(|| EffortError::Overflow("report total".to_string()))
    })
}

/// The `n` files with the most effort, highest first. Ties keep file order.
pub fn top_files_by_effort(files: &[FileEffort], n: usize) -> Vec<&FileEffort> {
    let mut sorted: Vec<&FileEffort> = files.iter().filter(|f| f.total > 0).collect();
    sorted.sort_by_key(|f| std::cmp::Reverse(f.total));
    sorted.truncate(n);
    sorted
}

/// Count files per effort level.
pub fn effort_by_level(files: &[FileEffort]) -> BTreeMap<EffortLevel, usize> {
    let mut levels = BTreeMap::new();
    for file in files {
        *levels.entry(file.level()).or_default() += 1;
    }
    levels
}

/// Count hints per category across the whole run, skipping hints the
/// filter keeps out of the totals.
pub fn hint_category_summary(
    ctx: &AnalysisContext,
    filter: &TagFilter,
) -> BTreeMap<IssueCategory, usize> {
    let mut categories = BTreeMap::new();
    for hint in ctx.graph().all_hints().filter(|h| filter.accepts(&h.tags)) {
        *categories.entry(hint.category).or_default() += 1;
    }
    categories
}

/// Build the report summary from scored files.
pub fn summarize(
    ctx: &AnalysisContext,
    filter: &TagFilter,
    files: &[FileEffort],
) -> Result<EffortSummary> {
    Ok(EffortSummary {
        total_effort: total_effort(files)?,
        files: files.len(),
        files_with_effort: files.iter().filter(|f| f.total > 0).count(),
        by_level: effort_by_level(files),
        hints_by_category: hint_category_summary(ctx, filter),
    })
}
