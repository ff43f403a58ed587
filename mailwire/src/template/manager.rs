use super::{ParameterResolver, RenderedTemplate, TemplateDescriptor, TemplateOptions};
use crate::error::ResolutionError;

/// Holds the configured template catalog and renders templates against a
/// caller's options via the parameter resolver.
pub struct TemplateManager {
    templates: Vec<TemplateDescriptor>,
    resolver: ParameterResolver,
}

impl TemplateManager {
    /// Templates are handed over once, in catalog order, at wiring time.
    pub fn new(templates: Vec<TemplateDescriptor>, resolver: ParameterResolver) -> Self {
        Self {
            templates,
            resolver,
        }
    }

    pub fn templates(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }

    /// Declared parameter names for `template`, empty when it never
    /// opted in to declaring any.
    pub fn parameter_names(&self, template: &str) -> Result<&[String], ResolutionError> {
        Ok(self.descriptor(template)?.parameter_names())
    }

    /// Compute every declared parameter of `template` against `options`,
    /// in declaration order.
    pub fn render(
        &self,
        template: &str,
        options: &dyn TemplateOptions,
    ) -> Result<RenderedTemplate, ResolutionError> {
        let names = self.parameter_names(template)?;

        let mut values = Vec::with_capacity(names.len());
        for name in names {
            values.push((name.clone(), self.resolver.compute_value(name, options)?));
        }

        Ok(RenderedTemplate::new(template, values))
    }

    fn descriptor(&self, template: &str) -> Result<&TemplateDescriptor, ResolutionError> {
        self.templates
            .iter()
            .find(|descriptor| descriptor.id == template)
            .ok_or_else(|| ResolutionError::TemplateNotFound(template.to_string()))
    }
}
