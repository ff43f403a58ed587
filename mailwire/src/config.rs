use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Declarative engine configuration.
///
/// ```yaml
/// main_sender: failover
/// senders:
///   failover:
///     chain:
///       senders: [primary, backup]
///   primary:
///     sender: { class: MemorySender }
///     repository: { class: MemoryRepository }
///   backup:
///     sender: { class: FileSender }
///     repository: { class: FileRepository }
/// templates:
///   - welcome
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the default sender entry; either a direct sender or a chain.
    pub main_sender: String,

    #[serde(default)]
    pub senders: HashMap<String, SenderEntry>,

    /// Template ids to wire, in catalog order.
    #[serde(default)]
    pub templates: Vec<String>,
}

/// A named entry under `senders`. A direct entry carries `sender` and
/// `repository`; a chain entry carries `chain` instead. Presence checks
/// happen during sender-set resolution, not during deserialization, so
/// an incomplete entry parses fine and fails wiring with a precise error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<ClassRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<ClassRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRef {
    pub class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEntry {
    /// Sender names in failover priority order.
    pub senders: Vec<String>,
}

impl EngineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}

impl SenderEntry {
    /// A fully specified direct entry.
    pub fn direct(sender_class: impl Into<String>, repository_class: impl Into<String>) -> Self {
        Self {
            sender: Some(ClassRef {
                class: sender_class.into(),
            }),
            repository: Some(ClassRef {
                class: repository_class.into(),
            }),
            chain: None,
        }
    }

    /// A chain entry over the given sender names.
    pub fn chain<I, S>(senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sender: None,
            repository: None,
            chain: Some(ChainEntry {
                senders: senders.into_iter().map(Into::into).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direct_sender() {
        let config = EngineConfig::from_yaml(
            r#"
main_sender: smtp
senders:
  smtp:
    sender: { class: SmtpSender }
    repository: { class: SmtpRepository }
templates:
  - welcome
"#,
        )
        .unwrap();

        assert_eq!(config.main_sender, "smtp");
        assert_eq!(config.templates, vec!["welcome"]);

        let entry = &config.senders["smtp"];
        assert_eq!(entry.sender.as_ref().unwrap().class, "SmtpSender");
        assert_eq!(entry.repository.as_ref().unwrap().class, "SmtpRepository");
        assert!(entry.chain.is_none());
    }

    #[test]
    fn test_parse_chain_sender() {
        let config = EngineConfig::from_yaml(
            r#"
main_sender: failover
senders:
  failover:
    chain:
      senders: [primary, backup]
  primary:
    sender: { class: A }
    repository: { class: ARepo }
  backup:
    sender: { class: B }
    repository: { class: BRepo }
"#,
        )
        .unwrap();

        let chain = config.senders["failover"].chain.as_ref().unwrap();
        assert_eq!(chain.senders, vec!["primary", "backup"]);
        assert!(config.templates.is_empty());
    }

    #[test]
    fn test_incomplete_entry_parses() {
        // Missing "repository" is a wiring error, not a parse error.
        let config = EngineConfig::from_yaml(
            r#"
main_sender: smtp
senders:
  smtp:
    sender: { class: SmtpSender }
"#,
        )
        .unwrap();

        assert!(config.senders["smtp"].repository.is_none());
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(EngineConfig::from_yaml("senders: [not, a, mapping").is_err());
    }
}
