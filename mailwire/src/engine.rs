//! One-time wiring: factories and template registrations go in, a
//! validated, ready-to-dispatch engine comes out.

use crate::config::EngineConfig;
use crate::error::{ConfigError, DispatchError, Error};
use crate::mailer::Mailer;
use crate::registry::ServiceRegistry;
use crate::sender::{Sender, SenderRepository, resolve_sender_set};
use crate::template::{
    ParameterResolver, TemplateDescriptor, TemplateManager, TemplateParameter,
};
use std::sync::Arc;

/// A template made available to the wiring step: its id plus the
/// parameter instances it declares, if it declares any.
pub struct TemplateRegistration {
    id: String,
    parameters: Option<Vec<Arc<dyn TemplateParameter>>>,
}

impl TemplateRegistration {
    /// A template that declares no parameters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(
        id: impl Into<String>,
        parameters: Vec<Arc<dyn TemplateParameter>>,
    ) -> Self {
        Self {
            id: id.into(),
            parameters: Some(parameters),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Builder for [`EmailEngine`].
///
/// The application registers its sender and repository factories and its
/// templates, then hands over the declarative configuration. `build`
/// validates the sender set, registers every declared parameter, and
/// assembles the mailer. Configuration problems abort here, before
/// anything can dispatch.
#[derive(Default)]
pub struct EngineBuilder {
    registry: Arc<ServiceRegistry>,
    templates: Vec<TemplateRegistration>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository<F>(self, class: &str, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SenderRepository>, DispatchError> + Send + Sync + 'static,
    {
        self.registry.register_repository(class, factory);
        self
    }

    pub fn with_sender<F>(self, class: &str, factory: F) -> Self
    where
        F: Fn(Arc<dyn SenderRepository>) -> Result<Arc<dyn Sender>, DispatchError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register_sender(class, factory);
        self
    }

    pub fn with_template(mut self, template: TemplateRegistration) -> Self {
        self.templates.push(template);
        self
    }

    pub fn build(self, config: &EngineConfig) -> Result<EmailEngine, Error> {
        let senders = resolve_sender_set(config)?;

        // Catalog order follows the configuration, not registration order.
        let mut descriptors = Vec::with_capacity(config.templates.len());
        for id in &config.templates {
            let registration = self
                .templates
                .iter()
                .find(|template| template.id == *id)
                .ok_or_else(|| ConfigError::UnknownTemplate(id.clone()))?;

            let names = registration.parameters.as_ref().map(|parameters| {
                parameters
                    .iter()
                    .map(|parameter| {
                        self.registry.register_parameter(parameter.clone());
                        parameter.name().to_string()
                    })
                    .collect()
            });

            descriptors.push(TemplateDescriptor {
                id: id.clone(),
                parameters: names,
            });
        }

        let resolver = ParameterResolver::new(self.registry.clone());
        let templates = TemplateManager::new(descriptors, resolver);

        Ok(EmailEngine {
            mailer: Mailer::new(senders, self.registry, templates),
        })
    }
}

/// The wired engine: a mailer over the resolved sender set and the
/// configured template catalog.
pub struct EmailEngine {
    mailer: Mailer,
}

impl EmailEngine {
    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }

    pub fn templates(&self) -> &TemplateManager {
        self.mailer.templates()
    }
}
