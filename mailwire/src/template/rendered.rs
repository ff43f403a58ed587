use serde_json::Value;

/// The rendered output of a template: its id plus the computed parameter
/// values, kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTemplate {
    template: String,
    values: Vec<(String, Value)>,
}

impl RenderedTemplate {
    pub(crate) fn new(template: impl Into<String>, values: Vec<(String, Value)>) -> Self {
        Self {
            template: template.into(),
            values,
        }
    }

    /// Id of the template this was rendered from.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
