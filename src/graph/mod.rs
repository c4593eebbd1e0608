//! Read-only analysis graph.
//!
//! A run's classifications and hints are loaded from a snapshot file and
//! indexed once. Providers never own the graph; they hold an
//! [`AnalysisContext`] that shares it behind an `Arc`.

use crate::error::GraphError;
use crate::models::{Classification, FileNode, FileUnit, InlineHint};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Serialized form of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    /// Identifier of the analysis run.
    #[serde(default = "default_run_id")]
    pub run_id: String,

    #[serde(default)]
    pub files: Vec<FileNode>,

    #[serde(default)]
    pub classifications: Vec<Classification>,

    #[serde(default)]
    pub hints: Vec<InlineHint>,
}

fn default_run_id() -> String {
    "default".to_string()
}

impl AnalysisSnapshot {
    /// Load a snapshot from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis snapshot: {}", path.display()))?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let snapshot: AnalysisSnapshot = if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse analysis snapshot: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse analysis snapshot: {}", path.display()))?
        };

        debug!(
            "Loaded snapshot '{}': {} files, {} classifications, {} hints",
            snapshot.run_id,
            snapshot.files.len(),
            snapshot.classifications.len(),
            snapshot.hints.len()
        );

        Ok(snapshot)
    }
}

/// Indexed, immutable view of an analysis run.
#[derive(Debug, Default)]
pub struct AnalysisGraph {
    files: BTreeMap<String, FileNode>,
    classifications: BTreeMap<String, Classification>,
    hints_by_file: BTreeMap<String, Vec<InlineHint>>,
}

impl AnalysisGraph {
    pub fn from_snapshot(snapshot: AnalysisSnapshot) -> Result<Self, GraphError> {
        let mut files = BTreeMap::new();
        for file in snapshot.files {
            if files.contains_key(&file.id) {
                return Err(GraphError::DuplicateFile(file.id));
            }
            files.insert(file.id.clone(), file);
        }

        let mut classifications = BTreeMap::new();
        for classification in snapshot.classifications {
            if classifications.contains_key(&classification.id) {
                return Err(GraphError::DuplicateClassification(classification.id));
            }
            classifications.insert(classification.id.clone(), classification);
        }

        let mut hints_by_file: BTreeMap<String, Vec<InlineHint>> = BTreeMap::new();
        for hint in snapshot.hints {
            if !files.contains_key(&hint.file) {
                return Err(GraphError::DanglingHint {
                    hint: hint.id,
                    file: hint.file,
                });
            }
            hints_by_file.entry(hint.file.clone()).or_default().push(hint);
        }

        for hints in hints_by_file.values_mut() {
            hints.sort_by_key(|h| h.line);
        }

        Ok(Self {
            files,
            classifications,
            hints_by_file,
        })
    }

    pub fn file(&self, id: &str) -> Option<&FileNode> {
        self.files.get(id)
    }

    pub fn classification(&self, id: &str) -> Option<&Classification> {
        self.classifications.get(id)
    }

    /// Hints located in the given file, ordered by line.
    pub fn hints_in(&self, file_id: &str) -> &[InlineHint] {
        self.hints_by_file
            .get(file_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all_hints(&self) -> impl Iterator<Item = &InlineHint> {
        self.hints_by_file.values().flatten()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Handle on one analysis run, passed explicitly to everything that binds
/// to it.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    run_id: String,
    graph: Arc<AnalysisGraph>,
}

impl AnalysisContext {
    pub fn new(run_id: impl Into<String>, graph: AnalysisGraph) -> Self {
        Self {
            run_id: run_id.into(),
            graph: Arc::new(graph),
        }
    }

    pub fn from_snapshot(snapshot: AnalysisSnapshot) -> Result<Self, GraphError> {
        let run_id = snapshot.run_id.clone();
        Ok(Self::new(run_id, AnalysisGraph::from_snapshot(snapshot)?))
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn graph(&self) -> &AnalysisGraph {
        &self.graph
    }

    /// Look up the node a file reference points at.
    pub fn resolve(&self, file: &FileUnit) -> Option<&FileNode> {
        self.graph.file(file.id())
    }

    /// All files in the run, ordered by id.
    pub fn files(&self) -> Vec<FileUnit> {
        self.graph.files.values().map(FileNode::unit).collect()
    }
}
