//! Explicit, typed replacement for a dependency-injection container.
//!
//! Class identifiers map to factory closures with explicit dependencies;
//! parameter names map to shared singleton instances. Everything is
//! registered once at wiring time and read-only afterwards.

use crate::error::DispatchError;
use crate::sender::{Sender, SenderRepository};
use crate::template::TemplateParameter;
use dashmap::DashMap;
use std::sync::Arc;

/// Builds a repository with no further dependencies.
pub type RepositoryFactory =
    Arc<dyn Fn() -> Result<Arc<dyn SenderRepository>, DispatchError> + Send + Sync>;

/// Builds a sender from its paired, already-constructed repository.
pub type SenderFactory = Arc<
    dyn Fn(Arc<dyn SenderRepository>) -> Result<Arc<dyn Sender>, DispatchError> + Send + Sync,
>;

#[derive(Default)]
pub struct ServiceRegistry {
    repositories: DashMap<String, RepositoryFactory>,
    senders: DashMap<String, SenderFactory>,
    parameters: DashMap<String, Arc<dyn TemplateParameter>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_repository<F>(&self, class: &str, factory: F)
    where
        F: Fn() -> Result<Arc<dyn SenderRepository>, DispatchError> + Send + Sync + 'static,
    {
        self.repositories
            .insert(class.to_string(), Arc::new(factory));
        tracing::info!(repository.class = class, "registered repository factory");
    }

    pub fn register_sender<F>(&self, class: &str, factory: F)
    where
        F: Fn(Arc<dyn SenderRepository>) -> Result<Arc<dyn Sender>, DispatchError>
            + Send
            + Sync
            + 'static,
    {
        self.senders.insert(class.to_string(), Arc::new(factory));
        tracing::info!(sender.class = class, "registered sender factory");
    }

    pub fn register_parameter(&self, parameter: Arc<dyn TemplateParameter>) {
        let name = parameter.name().to_string();
        self.parameters.insert(name.clone(), parameter);
        tracing::info!(parameter.name = name, "registered parameter");
    }

    /// The singleton registered under `name`, if any.
    pub fn parameter(&self, name: &str) -> Option<Arc<dyn TemplateParameter>> {
        self.parameters.get(name).map(|entry| entry.value().clone())
    }

    pub fn build_repository(
        &self,
        class: &str,
    ) -> Result<Arc<dyn SenderRepository>, DispatchError> {
        let factory = self
            .repositories
            .get(class)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DispatchError::FactoryNotFound(class.to_string()))?;
        factory()
    }

    pub fn build_sender(
        &self,
        class: &str,
        repository: Arc<dyn SenderRepository>,
    ) -> Result<Arc<dyn Sender>, DispatchError> {
        let factory = self
            .senders
            .get(class)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DispatchError::FactoryNotFound(class.to_string()))?;
        factory(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::{MemoryRepository, MemorySender};

    #[test]
    fn test_missing_factory_is_reported() {
        let registry = ServiceRegistry::new();

        match registry.build_repository("Ghost") {
            Err(DispatchError::FactoryNotFound(class)) => assert_eq!(class, "Ghost"),
            other => panic!("expected FactoryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_build_sender_from_paired_repository() {
        let registry = ServiceRegistry::new();
        let repository = Arc::new(MemoryRepository::new("noreply@example.com"));

        registry.register_repository("MemoryRepository", move || {
            let repository: Arc<dyn SenderRepository> = repository.clone();
            Ok(repository)
        });
        registry.register_sender("MemorySender", |repository| {
            let sender: Arc<dyn Sender> = Arc::new(MemorySender::new(repository)?);
            Ok(sender)
        });

        let repository = registry.build_repository("MemoryRepository").unwrap();
        assert!(registry.build_sender("MemorySender", repository).is_ok());
    }

    #[test]
    fn test_factory_failure_propagates() {
        let registry = ServiceRegistry::new();
        registry.register_repository("Flaky", || {
            Err(DispatchError::Construction {
                class: "Flaky".to_string(),
                reason: "credentials unavailable".to_string(),
            })
        });

        assert!(matches!(
            registry.build_repository("Flaky"),
            Err(DispatchError::Construction { .. })
        ));
    }
}
