//! `getMigrationEffortPointsForFile(file)` template method.
//!
//! Returns the migration effort points for one file as a plain number.

use super::{as_file_unit, TemplateMethod, TemplateValue};
use crate::analysis::EffortAggregator;
use crate::error::{EffortError, Result};
use crate::graph::AnalysisContext;
use crate::scoring::TagFilter;

pub const METHOD_NAME: &str = "getMigrationEffortPointsForFile";

pub struct GetEffortForFile {
    filter: TagFilter,
    aggregator: EffortAggregator,
}

impl GetEffortForFile {
    pub fn new(filter: TagFilter) -> Self {
        Self {
            filter,
            aggregator: EffortAggregator::unbound(),
        }
    }
}

impl TemplateMethod for GetEffortForFile {
    fn method_name(&self) -> &'static str {
        METHOD_NAME
    }

    fn set_context(&mut self, ctx: &AnalysisContext) {
        self.aggregator = EffortAggregator::bind(ctx, &self.filter);
    }

    fn exec(&self, args: &[TemplateValue]) -> Result<TemplateValue> {
        if args.len() != 1 {
            return Err(EffortError::InvalidArgumentCount {
                method: METHOD_NAME.to_string(),
                actual: args.len(),
            });
        }
        let file = as_file_unit(METHOD_NAME, &args[0])?;

        self.aggregator.compute(&file).map(TemplateValue::Number)
    }
}
