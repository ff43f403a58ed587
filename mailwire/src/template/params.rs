use super::TemplateOptions;
use crate::error::ResolutionError;
use crate::registry::ServiceRegistry;
use serde_json::Value;
use std::sync::Arc;

/// A named, described unit of template content, computed from a caller's
/// options value.
pub trait TemplateParameter: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Compute this parameter's value from `options`. The resolver passes
    /// the result through untouched; how a mismatched or incomplete
    /// options value is handled is this implementation's own contract.
    fn value(&self, options: &dyn TemplateOptions) -> Value;
}

/// Looks registered parameters up by name and delegates value computation
/// to them. Purely a lookup plus a delegate call; the registry hands back
/// the same singleton for each name.
#[derive(Clone)]
pub struct ParameterResolver {
    registry: Arc<ServiceRegistry>,
}

impl ParameterResolver {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn TemplateParameter>, ResolutionError> {
        self.registry
            .parameter(name)
            .ok_or_else(|| ResolutionError::ParameterNotFound(name.to_string()))
    }

    pub fn compute_value(
        &self,
        name: &str,
        options: &dyn TemplateOptions,
    ) -> Result<Value, ResolutionError> {
        Ok(self.resolve(name)?.value(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoteOptions {
        note: String,
    }

    impl TemplateOptions for NoteOptions {}

    struct NoteParameter;

    impl TemplateParameter for NoteParameter {
        fn name(&self) -> &str {
            "note"
        }

        fn description(&self) -> &str {
            "The caller's note, verbatim."
        }

        fn value(&self, options: &dyn TemplateOptions) -> Value {
            match options.downcast_ref::<NoteOptions>() {
                Some(options) => json!(options.note),
                None => Value::Null,
            }
        }
    }

    fn resolver() -> ParameterResolver {
        let registry = Arc::new(ServiceRegistry::new());
        registry.register_parameter(Arc::new(NoteParameter));
        ParameterResolver::new(registry)
    }

    #[test]
    fn test_compute_value_passes_through() {
        let resolver = resolver();
        let options = NoteOptions {
            note: "hello".to_string(),
        };

        let direct = NoteParameter.value(&options);
        let resolved = resolver.compute_value("note", &options).unwrap();
        assert_eq!(resolved, direct);
        assert_eq!(resolved, json!("hello"));
    }

    #[test]
    fn test_unknown_parameter_fails() {
        let resolver = resolver();
        let options = NoteOptions {
            note: "hello".to_string(),
        };

        match resolver.compute_value("missing", &options) {
            Err(ResolutionError::ParameterNotFound(name)) => assert_eq!(name, "missing"),
            other => panic!("expected ParameterNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_returns_same_singleton() {
        let resolver = resolver();
        let first = resolver.resolve("note").unwrap();
        let second = resolver.resolve("note").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_mismatched_options_left_to_parameter() {
        struct OtherOptions;
        impl TemplateOptions for OtherOptions {}

        let resolver = resolver();
        // NoteParameter's own contract for a foreign options type.
        assert_eq!(
            resolver.compute_value("note", &OtherOptions).unwrap(),
            Value::Null
        );
    }
}
