//! Markdown and JSON report generation.
//!
//! Per-file totals in the Markdown report are obtained through the
//! `getMigrationEffortPointsForFile` template method of the current render
//! pass, so a file that cannot be scored fails the whole render.

use crate::analysis::top_files_by_effort;
use crate::error::{EffortError, Result as EffortResult};
use crate::models::{EffortLevel, EffortReport, EffortSummary, FileEffort, ReportMetadata};
use crate::template::{effort_for_file::METHOD_NAME, RenderPass, TemplateValue};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(
    report: &EffortReport,
    pass: &RenderPass,
    top_files: usize,
) -> EffortResult<String> {
    let mut output = String::new();

    output.push_str("# Migration Effort Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_top_files_section(&report.files, top_files));
    output.push_str(&generate_files_section(&report.files, pass)?);
    output.push_str(&generate_footer());

    Ok(output)
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Input:** `{}`\n", metadata.input));
    section.push_str(&format!("- **Analysis Run:** {}\n", metadata.run_id));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Scoring Sources:** {}\n",
        metadata.providers.join(", ")
    ));
    section.push_str(&format!(
        "- **Scoring Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn generate_summary_section(summary: &EffortSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!(
        "**Total Effort:** {} points across {} files ({} with effort)\n\n",
        summary.total_effort, summary.files, summary.files_with_effort
    ));

    if !summary.by_level.is_empty() {
        section.push_str("### Files by Effort Level\n\n");
        section.push_str("| Level | Files |\n");
        section.push_str("|:---|:---:|\n");
        for (level, count) in &summary.by_level {
            section.push_str(&format!("| {} | {} |\n", level, count));
        }
        section.push('\n');
    }

    if !summary.hints_by_category.is_empty() {
        section.push_str("### Hints by Category\n\n");
        section.push_str("| Category | Hints |\n");
        section.push_str("|:---|:---:|\n");
        // Mandatory first
        for (category, count) in summary.hints_by_category.iter().rev() {
            section.push_str(&format!("| {} | {} |\n", category, count));
        }
        section.push('\n');
    }

    section
}

fn generate_top_files_section(files: &[FileEffort], n: usize) -> String {
    let top = top_files_by_effort(files, n);
    if top.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("### Highest Effort Files\n\n");
    section.push_str("| File | Effort | Level |\n");
    section.push_str("|:---|:---:|:---|\n");
    for file in top {
        section.push_str(&format!(
            "| `{}` | {} | {} |\n",
            file.path,
            file.total,
            file.level()
        ));
    }
    section.push('\n');

    section
}

fn generate_files_section(files: &[FileEffort], pass: &RenderPass) -> EffortResult<String> {
    let mut section = String::new();

    section.push_str("## Effort by File\n\n");

    if files.is_empty() {
        section.push_str("No files in this analysis run.\n\n");
        return Ok(section);
    }

    section.push_str("| File | Classification | Hints | Total | Level |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---|\n");

    for file in files {
        let value = pass.call(METHOD_NAME, &[TemplateValue::from(file.file.clone())])?;
        let total = value
            .as_number()
            .ok_or_else(|| EffortError::UnexpectedReturn {
                method: METHOD_NAME.to_string(),
                found: value.kind().to_string(),
            })?;

        section.push_str(&format!(
            "| `{}` | {} | {} | **{}** | {} |\n",
            file.path,
            file.contribution("classification"),
            file.contribution("hint"),
            total,
            EffortLevel::from_points(total)
        ));
    }
    section.push('\n');

    Ok(section)
}

fn generate_footer() -> String {
    "---\n\n*Report generated by effortmap*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &EffortReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::sample_snapshot;
    use crate::graph::AnalysisContext;
    use crate::report::build_report;
    use crate::scoring::TagFilter;
    use crate::template::TemplateMethod;

    fn scorable_context() -> AnalysisContext {
        let mut snapshot = sample_snapshot();
        snapshot.files.retain(|f| f.id != "F3");
        AnalysisContext::from_snapshot(snapshot).unwrap()
    }

    #[test]
    fn test_generate_markdown_report() {
        let ctx = scorable_context();
        let report = build_report(&ctx, &TagFilter::default(), "analysis.json").unwrap();
        let pass = RenderPass::new(&ctx, &TagFilter::default());

        let markdown = generate_markdown_report(&report, &pass, 5).unwrap();

        assert!(markdown.contains("# Migration Effort Report"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("**Total Effort:** 8 points across 2 files (1 with effort)"));
        assert!(markdown.contains("| `src/F1.java` | 5 | 3 | **8** | Unknown |"));
        assert!(markdown.contains("| `src/F2.java` | 0 | 0 | **0** | Info |"));
        assert!(markdown.contains("### Highest Effort Files"));
        assert!(markdown.contains("| Mandatory | 1 |"));
    }

    #[test]
    fn test_render_fails_for_unscorable_file() {
        let ctx = scorable_context();
        let report = build_report(&ctx, &TagFilter::default(), "analysis.json").unwrap();

        // A pass bound to a run that lacks F1 cannot score the report's files.
        let mut other = sample_snapshot();
        other.run_id = "other".to_string();
        other.files.retain(|f| f.id == "F2");
        other.hints.clear();
        let other_ctx = AnalysisContext::from_snapshot(other).unwrap();
        let pass = RenderPass::new(&other_ctx, &TagFilter::default());

        let err = generate_markdown_report(&report, &pass, 5).unwrap_err();
        assert!(matches!(err, EffortError::InvalidArgument(_)));
    }

    struct TextEffort;

    impl TemplateMethod for TextEffort {
        fn method_name(&self) -> &'static str {
            METHOD_NAME
        }

        fn set_context(&mut self, _ctx: &AnalysisContext) {}

        fn exec(&self, _args: &[TemplateValue]) -> EffortResult<TemplateValue> {
            Ok(TemplateValue::Str("eight".to_string()))
        }
    }

    #[test]
    fn test_non_numeric_effort_fails_render() {
        let ctx = scorable_context();
        let report = build_report(&ctx, &TagFilter::default(), "analysis.json").unwrap();
        let pass = RenderPass::with_methods(&ctx, vec![Box::new(TextEffort)]);

        let err = generate_markdown_report(&report, &pass, 5).unwrap_err();
        assert_eq!(
            err,
            EffortError::UnexpectedReturn {
                method: METHOD_NAME.to_string(),
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_run() {
        let ctx = AnalysisContext::from_snapshot(Default::default()).unwrap();
        let report = build_report(&ctx, &TagFilter::default(), "empty.json").unwrap();
        let pass = RenderPass::new(&ctx, &TagFilter::default());

        let markdown = generate_markdown_report(&report, &pass, 5).unwrap();
        assert!(markdown.contains("No files in this analysis run."));
        assert!(!markdown.contains("### Highest Effort Files"));
    }

    #[test]
    fn test_generate_json_report() {
        let ctx = scorable_context();
        let report = build_report(&ctx, &TagFilter::default(), "analysis.json").unwrap();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"run_id\": \"run-1\""));
        assert!(json.contains("\"total_effort\": 8"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["files"][0]["file"], "F1");
        assert_eq!(parsed["files"][0]["contributions"]["hint"], 3);
        assert_eq!(parsed["summary"]["by_level"]["unknown"], 1);
    }
}
