//! Template method layer.
//!
//! Report templates call named methods with loosely typed arguments. A
//! [`RenderPass`] owns one set of method instances bound to a single
//! analysis context; a new pass is created for every render.

pub mod effort_for_file;

pub use effort_for_file::GetEffortForFile;

use crate::error::{EffortError, Result};
use crate::graph::AnalysisContext;
use crate::models::{EffortPoints, FileUnit};
use crate::scoring::TagFilter;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A value as seen by the templating host.
#[derive(Clone)]
#[allow(dead_code)] // Null and Str only come from template hosts
pub enum TemplateValue {
    Null,
    Str(String),
    Number(EffortPoints),
    /// An arbitrary host object, opaque until downcast.
    Wrapped {
        type_name: &'static str,
        value: Arc<dyn Any + Send + Sync>,
    },
}

impl TemplateValue {
    pub fn wrap<T: Any + Send + Sync>(value: T) -> Self {
        TemplateValue::Wrapped {
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Short description of what the value holds, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TemplateValue::Null => "null",
            TemplateValue::Str(_) => "string",
            TemplateValue::Number(_) => "number",
            TemplateValue::Wrapped { type_name, .. } => *type_name,
        }
    }

    pub fn as_number(&self) -> Option<EffortPoints> {
        match self {
            TemplateValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Debug for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Null => write!(f, "Null"),
            TemplateValue::Str(s) => write!(f, "Str({:?})", s),
            TemplateValue::Number(n) => write!(f, "Number({})", n),
            TemplateValue::Wrapped { type_name, .. } => write!(f, "Wrapped({})", type_name),
        }
    }
}

impl From<FileUnit> for TemplateValue {
    fn from(file: FileUnit) -> Self {
        TemplateValue::wrap(file)
    }
}

/// Unwrap a host value into a file reference.
pub fn as_file_unit(method: &str, value: &TemplateValue) -> Result<FileUnit> {
    match value {
        TemplateValue::Wrapped { value: inner, .. } => inner
            .downcast_ref::<FileUnit>()
            .cloned()
            .ok_or_else(|| EffortError::InvalidArgumentType {
                method: method.to_string(),
                found: value.kind().to_string(),
            }),
        other => Err(EffortError::InvalidArgumentType {
            method: method.to_string(),
            found: other.kind().to_string(),
        }),
    }
}

/// A method callable from report templates.
pub trait TemplateMethod: Send {
    fn method_name(&self) -> &'static str;

    /// Bind to the analysis context of the current render.
    fn set_context(&mut self, ctx: &AnalysisContext);

    fn exec(&self, args: &[TemplateValue]) -> Result<TemplateValue>;
}

/// Fresh, unbound instances of every built-in template method.
pub fn default_methods(filter: &TagFilter) -> Vec<Box<dyn TemplateMethod>> {
    vec![Box::new(GetEffortForFile::new(filter.clone()))]
}

/// One invocation context: method instances bound to a single run.
pub struct RenderPass {
    run_id: String,
    methods: BTreeMap<&'static str, Box<dyn TemplateMethod>>,
}

impl RenderPass {
    pub fn new(ctx: &AnalysisContext, filter: &TagFilter) -> Self {
        Self::with_methods(ctx, default_methods(filter))
    }

    pub fn with_methods(ctx: &AnalysisContext, methods: Vec<Box<dyn TemplateMethod>>) -> Self {
        let methods = methods
            .into_iter()
            .map(|mut m| {
                m.set_context(ctx);
                (m.method_name(), m)
            })
            .collect::<BTreeMap<_, _>>();

        debug!(
            "Render pass for run '{}' with methods: {:?}",
            ctx.run_id(),
            methods.keys().collect::<Vec<_>>()
        );

        Self {
            run_id: ctx.run_id().to_string(),
            methods,
        }
    }

    #[allow(dead_code)] // Host-side introspection
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    #[allow(dead_code)] // Host-side introspection
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.keys().copied().collect()
    }

    pub fn call(&self, name: &str, args: &[TemplateValue]) -> Result<TemplateValue> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| EffortError::UnknownMethod(name.to_string()))?;
        method.exec(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::sample_context;

    #[test]
    fn test_as_file_unit_unwraps_file() {
        let value = TemplateValue::from(FileUnit::new("F1"));
        assert_eq!(as_file_unit("m", &value), Ok(FileUnit::new("F1")));
    }

    #[test]
    fn test_as_file_unit_rejects_other_values() {
        for value in [
            TemplateValue::Null,
            TemplateValue::Str("F1".to_string()),
            TemplateValue::Number(1),
            TemplateValue::wrap(42u32),
        ] {
            assert!(matches!(
                as_file_unit("m", &value),
                Err(EffortError::InvalidArgumentType { .. })
            ));
        }
    }

    #[test]
    fn test_kind_names_wrapped_type() {
        assert_eq!(TemplateValue::wrap(7u32).kind(), "u32");
        assert_eq!(TemplateValue::Null.kind(), "null");
    }

    #[test]
    fn test_render_pass_dispatch() {
        let pass = RenderPass::new(&sample_context(), &TagFilter::default());
        assert_eq!(pass.run_id(), "run-1");
        assert_eq!(pass.method_names(), vec!["getMigrationEffortPointsForFile"]);

        let result = pass
            .call(
                "getMigrationEffortPointsForFile",
                &[TemplateValue::from(FileUnit::new("F1"))],
            )
            .unwrap();
        assert_eq!(result.as_number(), Some(8));
    }

    #[test]
    fn test_render_pass_unknown_method() {
        let pass = RenderPass::new(&sample_context(), &TagFilter::default());
        assert_eq!(
            pass.call("getNothing", &[]).unwrap_err(),
            EffortError::UnknownMethod("getNothing".to_string())
        );
    }
}
