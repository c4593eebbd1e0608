//! Effort attributed to a file's classifications.

use super::{checked_sum, ScoreProvider, TagFilter};
use crate::error::ProviderError;
use crate::graph::AnalysisContext;
use crate::models::{EffortPoints, FileUnit};
use tracing::debug;

/// Sums the effort of every classification attached to a file.
pub struct ClassificationScoreProvider {
    ctx: AnalysisContext,
    filter: TagFilter,
}

impl ClassificationScoreProvider {
    pub fn bind(ctx: &AnalysisContext, filter: TagFilter) -> Self {
        Self {
            ctx: ctx.clone(),
            filter,
        }
    }
}

impl ScoreProvider for ClassificationScoreProvider {
    fn name(&self) -> &'static str {
        "classification"
    }

    fn score(&self, file: &FileUnit) -> Result<EffortPoints, ProviderError> {
        let node = self
            .ctx
            .resolve(file)
            .ok_or_else(|| ProviderError::FileNotFound(file.id().to_string()))?;

        let mut efforts = Vec::with_capacity(node.classifications.len());
        for id in &node.classifications {
            let classification = self.ctx.graph().classification(id).ok_or_else(|| {
                ProviderError::ClassificationNotFound {
                    file: file.id().to_string(),
                    classification: id.clone(),
                }
            })?;

            if self.filter.accepts(&classification.tags) {
                efforts.push(classification.effort);
            }
        }

        let total = checked_sum(file, efforts)?;
        debug!("Classification effort for {}: {}", file, total);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{classification, file, sample_context, sample_snapshot};

    #[test]
    fn test_scores_attached_classifications() {
        let provider = ClassificationScoreProvider::bind(&sample_context(), TagFilter::default());
        assert_eq!(provider.score(&FileUnit::new("F1")), Ok(5));
        assert_eq!(provider.score(&FileUnit::new("F2")), Ok(0));
    }

    #[test]
    fn test_sums_multiple_classifications() {
        let mut snapshot = sample_snapshot();
        snapshot.files.push(file("F4", &["c-ejb", "c-jpa"]));
        snapshot.classifications.push(classification("c-jpa", 2, &["jpa"]));
        let ctx = AnalysisContext::from_snapshot(snapshot).unwrap();

        let provider = ClassificationScoreProvider::bind(&ctx, TagFilter::default());
        assert_eq!(provider.score(&FileUnit::new("F4")), Ok(7));

        let only_jpa = ClassificationScoreProvider::bind(
            &ctx,
            TagFilter::new(vec!["jpa".to_string()], vec![]),
        );
        assert_eq!(only_jpa.score(&FileUnit::new("F4")), Ok(2));
    }

    #[test]
    fn test_missing_classification_is_lookup_failure() {
        let provider = ClassificationScoreProvider::bind(&sample_context(), TagFilter::default());
        assert_eq!(
            provider.score(&FileUnit::new("F3")),
            Err(ProviderError::ClassificationNotFound {
                file: "F3".to_string(),
                classification: "c-missing".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_file() {
        let provider = ClassificationScoreProvider::bind(&sample_context(), TagFilter::default());
        assert_eq!(
            provider.score(&FileUnit::new("ghost")),
            Err(ProviderError::FileNotFound("ghost".to_string()))
        );
    }
}
