//! Configuration-driven email dispatch.
//!
//! A declarative configuration names a main sender (a single transport or
//! an ordered failover chain) and a catalog of templates; the engine wires
//! sender factories, template parameter singletons, and a mailer together
//! and dispatches rendered templates best-effort through the chain.

pub mod config;
pub mod engine;
pub mod error;
pub mod mailer;
pub mod registry;
pub mod sender;
pub mod template;

pub use config::{ChainEntry, ClassRef, EngineConfig, SenderEntry};
pub use engine::{EmailEngine, EngineBuilder, TemplateRegistration};
pub use error::{ConfigError, DispatchError, Error, ResolutionError, Result};
pub use mailer::Mailer;
pub use registry::{RepositoryFactory, SenderFactory, ServiceRegistry};
pub use sender::{
    Delivery, FileRepository, FileSender, MemoryRepository, MemorySender, ResolvedSender, Sender,
    SenderRepository, resolve_sender_set,
};
pub use template::{
    ParameterResolver, RenderedTemplate, TemplateDescriptor, TemplateManager, TemplateOptions,
    TemplateParameter,
};

pub mod prelude {
    pub use crate::{
        EmailEngine, EngineBuilder, EngineConfig, Error, Mailer, RenderedTemplate, Sender,
        SenderEntry, SenderRepository, ServiceRegistry, TemplateOptions, TemplateParameter,
        TemplateRegistration,
    };
}
