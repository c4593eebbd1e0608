//! Score providers.
//!
//! Each provider reports the effort one scoring source attributes to a
//! file. Providers are bound to an [`AnalysisContext`] when constructed and
//! are meant to be rebuilt for every invocation context.

pub mod classification;
pub mod hint;

pub use classification::ClassificationScoreProvider;
pub use hint::HintScoreProvider;

use crate::error::ProviderError;
use crate::graph::AnalysisContext;
use crate::models::{EffortPoints, FileUnit};
use serde::{Deserialize, Serialize};

/// A single source of per-file effort.
pub trait ScoreProvider: Send + Sync {
    /// Short name used in per-file breakdowns.
    fn name(&self) -> &'static str;

    fn score(&self, file: &FileUnit) -> Result<EffortPoints, ProviderError>;
}

/// Restricts which classifications and hints count toward effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    /// When non-empty, an item must carry at least one of these tags.
    #[serde(default)]
    pub include: Vec<String>,

    /// Items carrying any of these tags never count.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl TagFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn accepts(&self, tags: &[String]) -> bool {
        if tags.iter().any(|t| self.exclude.contains(t)) {
            return false;
        }
        self.include.is_empty() || tags.iter().any(|t| self.include.contains(t))
    }
}

/// Build the default provider set bound to `ctx`.
pub fn default_providers(ctx: &AnalysisContext, filter: &TagFilter) -> Vec<Box<dyn ScoreProvider>> {
    vec![
        Box::new(ClassificationScoreProvider::bind(ctx, filter.clone())),
        Box::new(HintScoreProvider::bind(ctx, filter.clone())),
    ]
}

/// Sum effort values, reporting overflow against `file`.
pub(crate) fn checked_sum<I>(file: &FileUnit, values: I) -> Result<EffortPoints, ProviderError>
where
    I: IntoIterator<Item = EffortPoints>,
{
    values.into_iter().try_fold(0u64, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| ProviderError::Overflow(file.id().to_string()))
    })
}
