use super::{Sender, SenderRepository};
use crate::error::DispatchError;
use crate::template::RenderedTemplate;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A delivery recorded by [`MemorySender`].
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub from: String,
    pub to: String,
    pub template: String,
    pub values: Vec<(String, Value)>,
}

/// Recipient store for [`MemorySender`]: carries the from-address and
/// keeps every delivery, so tests and demos can inspect the outbox after
/// the per-dispatch sender instance is gone.
#[derive(Debug)]
pub struct MemoryRepository {
    from: String,
    outbox: Mutex<Vec<Delivery>>,
}

impl MemoryRepository {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.outbox.lock().map(|outbox| outbox.clone()).unwrap_or_default()
    }

    fn record(&self, delivery: Delivery) {
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(delivery);
        }
    }
}

impl SenderRepository for MemoryRepository {}

/// In-process sender backed by [`MemoryRepository`]. The `declining`
/// constructor builds one whose transport refuses every message, which is
/// what failover tests and demos put at the front of a chain.
pub struct MemorySender {
    repository: Arc<MemoryRepository>,
    accept: bool,
}

impl MemorySender {
    pub fn new(repository: Arc<dyn SenderRepository>) -> Result<Self, DispatchError> {
        Ok(Self {
            repository: downcast(repository, "MemorySender")?,
            accept: true,
        })
    }

    pub fn declining(repository: Arc<dyn SenderRepository>) -> Result<Self, DispatchError> {
        Ok(Self {
            repository: downcast(repository, "MemorySender")?,
            accept: false,
        })
    }
}

fn downcast(
    repository: Arc<dyn SenderRepository>,
    class: &str,
) -> Result<Arc<MemoryRepository>, DispatchError> {
    repository
        .downcast_arc::<MemoryRepository>()
        .map_err(|_| DispatchError::Construction {
            class: class.to_string(),
            reason: "paired repository is not a MemoryRepository".to_string(),
        })
}

#[async_trait]
impl Sender for MemorySender {
    async fn send(
        &self,
        template: &RenderedTemplate,
        email: &str,
    ) -> Result<bool, DispatchError> {
        if !self.accept {
            return Ok(false);
        }

        self.repository.record(Delivery {
            from: self.repository.from.clone(),
            to: email.to_string(),
            template: template.template().to_string(),
            values: template
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        });

        Ok(true)
    }
}
