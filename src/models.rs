//! Data models for effort scoring.
//!
//! This module contains the core data structures used throughout
//! the application for representing files, classifications, hints,
//! and effort reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Abstract, additive, non-negative migration effort units.
pub type EffortPoints = u64;

/// Reference to a single analyzed file in the analysis graph.
///
/// Only the identity is carried; the node itself is owned by the graph
/// and resolved through an [`AnalysisContext`](crate::graph::AnalysisContext).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileUnit {
    id: String,
}

impl FileUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for FileUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Category of an inline hint, ordered by how much it forces a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    /// Informational only, no change required
    Information,
    /// Might need a change depending on usage
    #[default]
    Potential,
    /// Change recommended but not blocking
    Optional,
    /// Change required for the migration to succeed
    Mandatory,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::Information => write!(f, "Information"),
            IssueCategory::Potential => write!(f, "Potential"),
            IssueCategory::Optional => write!(f, "Optional"),
            IssueCategory::Mandatory => write!(f, "Mandatory"),
        }
    }
}

/// Coarse bucket for a per-file effort total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Info,
    Trivial,
    Complex,
    Redesign,
    Architectural,
    Unknown,
}

impl EffortLevel {
    pub fn from_points(points: EffortPoints) -> Self {
        match points {
            0 => EffortLevel::Info,
            1 => EffortLevel::Trivial,
            2..=3 => EffortLevel::Complex,
            4..=5 => EffortLevel::Redesign,
            6..=7 => EffortLevel::Architectural,
            _ => EffortLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Info => "Info",
            EffortLevel::Trivial => "Trivial",
            EffortLevel::Complex => "Complex",
            EffortLevel::Redesign => "Redesign",
            EffortLevel::Architectural => "Architectural",
            EffortLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file node as stored in the analysis graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Stable identity of the file within the run.
    pub id: String,
    /// Path to the file (relative to the analyzed application root).
    pub path: String,
    /// Ids of the classifications attached to this file.
    #[serde(default)]
    pub classifications: Vec<String>,
}

impl FileNode {
    pub fn unit(&self) -> FileUnit {
        FileUnit::new(self.id.clone())
    }
}

/// A classification assigned by the classification engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub id: String,
    pub title: String,
    /// Baseline effort for every file carrying this classification.
    #[serde(default)]
    pub effort: EffortPoints,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A file-localized issue flagged by the hint engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineHint {
    pub id: String,
    /// Id of the file the hint is located in.
    pub file: String,
    /// Line number of the hint (1-indexed).
    #[serde(default)]
    pub line: usize,
    pub title: String,
    #[serde(default)]
    pub effort: EffortPoints,
    #[serde(default)]
    pub category: IssueCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-file effort breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEffort {
    pub file: FileUnit,
    pub path: String,
    /// Effort contributed by each provider, keyed by provider name.
    pub contributions: BTreeMap<String, EffortPoints>,
    pub total: EffortPoints,
}

impl FileEffort {
    pub fn level(&self) -> EffortLevel {
        EffortLevel::from_points(self.total)
    }

    /// Effort contributed by the named provider (0 when it was not consulted).
    pub fn contribution(&self, provider: &str) -> EffortPoints {
        self.contributions.get(provider).copied().unwrap_or(0)
    }
}

/// Summary of effort across all scored files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffortSummary {
    /// Sum of every file's total.
    pub total_effort: EffortPoints,
    /// Number of files scored.
    pub files: usize,
    /// Number of files with non-zero effort.
    pub files_with_effort: usize,
    /// File counts grouped by effort level.
    pub by_level: BTreeMap<EffortLevel, usize>,
    /// Hint counts grouped by category.
    pub hints_by_category: BTreeMap<IssueCategory, usize>,
}

/// Metadata about the effort report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the analysis snapshot that was scored.
    pub input: String,
    /// Identifier of the analysis run.
    pub run_id: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Providers consulted, in registration order.
    pub providers: Vec<String>,
    /// Duration of the scoring in seconds.
    pub duration_seconds: f64,
}

/// The complete migration effort report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffortReport {
    pub metadata: ReportMetadata,
    /// Per-file breakdown, sorted by file id.
    pub files: Vec<FileEffort>,
    pub summary: EffortSummary,
}
