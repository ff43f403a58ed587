mod chain;
mod file;
mod memory;

pub use chain::{ResolvedSender, resolve_sender_set};
pub use file::{FileRepository, FileSender};
pub use memory::{Delivery, MemoryRepository, MemorySender};

use crate::error::DispatchError;
use crate::template::RenderedTemplate;
use async_trait::async_trait;
use downcast_rs::{DowncastSync, impl_downcast};

/// A sender's own dependency: a credential store, recipient store, or
/// output location. Factories hand one to the paired sender factory at
/// construction time; concrete senders downcast to their own type.
pub trait SenderRepository: DowncastSync + std::fmt::Debug {}
impl_downcast!(sync SenderRepository);

/// Delivers a rendered template to a destination address.
///
/// `Ok(false)` means the transport declined the message; `Err` means it
/// failed outright. The mailer treats both as a cue to advance to the
/// next chain member.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(
        &self,
        template: &RenderedTemplate,
        email: &str,
    ) -> Result<bool, DispatchError>;
}
