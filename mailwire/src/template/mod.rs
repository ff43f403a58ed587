mod manager;
mod options;
mod params;
mod rendered;

pub use manager::TemplateManager;
pub use options::TemplateOptions;
pub use params::{ParameterResolver, TemplateParameter};
pub use rendered::RenderedTemplate;

/// A configured template: its id and, when it opts in, the ordered
/// parameter names it declares. `parameters: None` means the template
/// declares nothing and renders to an empty mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub id: String,
    pub parameters: Option<Vec<String>>,
}

impl TemplateDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: None,
        }
    }

    pub fn with_parameters<I, S>(id: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            parameters: Some(parameters.into_iter().map(Into::into).collect()),
        }
    }

    /// Declared parameter names, empty for templates that never opted in.
    pub fn parameter_names(&self) -> &[String] {
        self.parameters.as_deref().unwrap_or(&[])
    }
}
