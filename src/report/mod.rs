//! Effort report assembly and rendering.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::analysis::{effort_by_file, summarize, EffortAggregator};
use crate::error::Result;
use crate::graph::AnalysisContext;
use crate::models::{EffortReport, ReportMetadata};
use crate::scoring::TagFilter;
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// Score every file of the run and assemble the report model.
pub fn build_report(ctx: &AnalysisContext, filter: &TagFilter, input: &str) -> Result<EffortReport> {
    let start = Instant::now();

    let aggregator = EffortAggregator::bind(ctx, filter);
    let files = effort_by_file(&aggregator, &ctx.files())?;
    let summary = summarize(ctx, filter, &files)?;

    info!(
        "Scored {} files in run '{}': {} effort points",
        files.len(),
        ctx.run_id(),
        summary.total_effort
    );

    let metadata = ReportMetadata {
        input: input.to_string(),
        run_id: ctx.run_id().to_string(),
        generated_at: Utc::now(),
        providers: aggregator
            .provider_names()
            .into_iter()
            .map(String::from)
            .collect(),
        duration_seconds: start.elapsed().as_secs_f64(),
    };

    Ok(EffortReport {
        metadata,
        files,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AnalysisSnapshot;
    use crate::models::{EffortLevel, IssueCategory};
    use std::path::Path;

    fn fixture_context() -> AnalysisContext {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/analysis.json");
        AnalysisContext::from_snapshot(AnalysisSnapshot::load(&path).unwrap()).unwrap()
    }

    #[test]
    fn test_build_report_from_fixture() {
        let report = build_report(&fixture_context(), &TagFilter::default(), "analysis.json").unwrap();

        assert_eq!(report.metadata.run_id, "petstore-eap7");
        assert_eq!(report.metadata.providers, vec!["classification", "hint"]);
        assert_eq!(report.summary.files, 4);
        assert_eq!(report.summary.total_effort, 10);
        assert_eq!(report.summary.files_with_effort, 2);

        let cart = &report.files[0];
        assert_eq!(cart.file.id(), "f-1");
        assert_eq!(cart.contribution("classification"), 1);
        assert_eq!(cart.contribution("hint"), 4);
        assert_eq!(cart.level(), EffortLevel::Redesign);
    }

    #[test]
    fn test_build_report_with_tag_filter() {
        let filter = TagFilter::new(vec![], vec!["jms".to_string()]);
        let report = build_report(&fixture_context(), &filter, "analysis.json").unwrap();

        // f-2 loses both classifications and its only hint
        assert_eq!(report.files[1].total, 0);
        assert_eq!(report.summary.total_effort, 5);
    }

    #[test]
    fn test_hint_categories_follow_tag_filter() {
        let filter = TagFilter::new(vec![], vec!["jms".to_string(), "logging".to_string()]);
        let report = build_report(&fixture_context(), &filter, "analysis.json").unwrap();

        let categories = &report.summary.hints_by_category;
        assert_eq!(categories.get(&IssueCategory::Potential), None);
        assert_eq!(categories.get(&IssueCategory::Information), None);
        assert_eq!(categories.get(&IssueCategory::Mandatory), Some(&1));
        assert_eq!(categories.get(&IssueCategory::Optional), Some(&1));
        assert_eq!(report.summary.total_effort, 5);
    }
}
