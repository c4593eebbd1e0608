//! Effort attributed to inline hints.

use super::{checked_sum, ScoreProvider, TagFilter};
use crate::error::ProviderError;
use crate::graph::AnalysisContext;
use crate::models::{EffortPoints, FileUnit};
use tracing::debug;

/// Sums the effort of every hint located in a file.
pub struct HintScoreProvider {
    ctx: AnalysisContext,
    filter: TagFilter,
}

impl HintScoreProvider {
    pub fn bind(ctx: &AnalysisContext, filter: TagFilter) -> Self {
        Self {
            ctx: ctx.clone(),
            filter,
        }
    }
}

impl ScoreProvider for HintScoreProvider {
    fn name(&self) -> &'static str {
        "hint"
    }

    fn score(&self, file: &FileUnit) -> Result<EffortPoints, ProviderError> {
        if self.ctx.resolve(file).is_none() {
            return Err(ProviderError::FileNotFound(file.id().to_string()));
        }

        let hints = self.ctx.graph().hints_in(file.id());
        let total = checked_sum(
            file,
            hints
                .iter()
                .filter(|h| self.filter.accepts(&h.tags))
                .map(|h| h.effort),
        )?;

        debug!("Hint effort for {} ({} hints): {}", file, hints.len(), total);
        Ok(total)
    }
}
