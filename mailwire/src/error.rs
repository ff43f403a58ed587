use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Wiring-time failures. These are fatal: an engine must not be built
/// from a configuration that produces one.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("main sender \"{name}\" does not exist in senders {known:?}")]
    UnknownSender { name: String, known: Vec<String> },

    #[error("\"sender\" and \"repository\" must be defined in \"{0}\" sender")]
    MissingSenderParts(String),

    #[error("template \"{0}\" is configured but was never registered")]
    UnknownTemplate(String),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Render-time lookup failures. These indicate a wiring mismatch rather
/// than a transient condition and are surfaced to the caller.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("parameter \"{0}\" is not registered")]
    ParameterNotFound(String),

    #[error("template \"{0}\" is not configured")]
    TemplateNotFound(String),
}

/// Per-sender dispatch failures. The mailer consumes these while walking
/// the failover chain; they reach callers only through logs.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no factory registered for \"{0}\"")]
    FactoryNotFound(String),

    #[error("failed to construct \"{class}\": {reason}")]
    Construction { class: String, reason: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
