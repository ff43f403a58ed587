use crate::error::{DispatchError, Error};
use crate::registry::ServiceRegistry;
use crate::sender::ResolvedSender;
use crate::template::{RenderedTemplate, TemplateManager, TemplateOptions};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Renders a template and dispatches it through the configured sender,
/// falling back through the chain in configured order.
///
/// Holds no mutable state after construction; sharing one instance
/// across concurrent callers is safe as long as the registered sender
/// implementations are.
pub struct Mailer {
    senders: Vec<ResolvedSender>,
    registry: Arc<ServiceRegistry>,
    templates: TemplateManager,
}

impl Mailer {
    pub fn new(
        senders: Vec<ResolvedSender>,
        registry: Arc<ServiceRegistry>,
        templates: TemplateManager,
    ) -> Self {
        Self {
            senders,
            registry,
            templates,
        }
    }

    pub fn templates(&self) -> &TemplateManager {
        &self.templates
    }

    /// Render `template` against `options` and deliver it to `email`.
    ///
    /// Wiring mismatches discovered while rendering (unknown template,
    /// unregistered parameter) come back as `Err`. Transport trouble does
    /// not: a chain member that fails to construct, declines the message,
    /// or errors is logged and the next member attempted. `Ok(false)`
    /// means the whole chain was exhausted; delivery is best-effort.
    pub async fn send(
        &self,
        template: &str,
        options: &dyn TemplateOptions,
        email: &str,
    ) -> Result<bool, Error> {
        let rendered = self.templates.render(template, options)?;

        for entry in &self.senders {
            match self.attempt(entry, &rendered, email).await {
                Ok(true) => {
                    info!(sender = %entry.name, template, "email dispatched");
                    return Ok(true);
                }
                Ok(false) => {
                    warn!(sender = %entry.name, template, "sender declined message");
                }
                Err(e) => {
                    error!(sender = %entry.name, template, error = %e, "sender failed");
                }
            }
        }

        error!(template, email, "every configured sender failed");
        Ok(false)
    }

    async fn attempt(
        &self,
        entry: &ResolvedSender,
        rendered: &RenderedTemplate,
        email: &str,
    ) -> Result<bool, DispatchError> {
        let repository = self.registry.build_repository(&entry.repository_class)?;
        let sender = self.registry.build_sender(&entry.sender_class, repository)?;
        sender.send(rendered, email).await
    }
}
