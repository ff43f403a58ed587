//! Flattens the `main_sender` / `senders` configuration into an ordered,
//! validated candidate list for dispatch.

use crate::config::{EngineConfig, SenderEntry};
use crate::error::ConfigError;

/// One validated entry of the resolved sender set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSender {
    pub name: String,
    pub sender_class: String,
    pub repository_class: String,
}

/// Resolve the configured main sender into the ordered set of senders to
/// dispatch through.
///
/// A direct main sender yields a single entry. A chain yields one entry
/// per member in declared order (repeated names collapse to their first
/// occurrence). Every referenced name must exist under `senders`, and
/// every resolved entry must carry both `sender.class` and
/// `repository.class`.
pub fn resolve_sender_set(config: &EngineConfig) -> Result<Vec<ResolvedSender>, ConfigError> {
    let main = lookup(config, &config.main_sender)?;

    let mut set = Vec::new();
    if let Some(chain) = &main.chain {
        for name in &chain.senders {
            if set.iter().any(|s: &ResolvedSender| s.name == *name) {
                continue;
            }
            set.push(validate(name, lookup(config, name)?)?);
        }
    } else {
        set.push(validate(&config.main_sender, main)?);
    }

    Ok(set)
}

fn lookup<'a>(config: &'a EngineConfig, name: &str) -> Result<&'a SenderEntry, ConfigError> {
    config
        .senders
        .get(name)
        .ok_or_else(|| ConfigError::UnknownSender {
            name: name.to_string(),
            known: {
                // Sorted so the error message is deterministic.
                let mut known: Vec<String> = config.senders.keys().cloned().collect();
                known.sort();
                known
            },
        })
}

fn validate(name: &str, entry: &SenderEntry) -> Result<ResolvedSender, ConfigError> {
    match (&entry.sender, &entry.repository) {
        (Some(sender), Some(repository)) => Ok(ResolvedSender {
            name: name.to_string(),
            sender_class: sender.class.clone(),
            repository_class: repository.class.clone(),
        }),
        _ => Err(ConfigError::MissingSenderParts(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(
        main_sender: &str,
        senders: Vec<(&str, SenderEntry)>,
    ) -> EngineConfig {
        EngineConfig {
            main_sender: main_sender.to_string(),
            senders: senders
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect::<HashMap<_, _>>(),
            templates: vec![],
        }
    }

    #[test]
    fn test_direct_sender_resolves_to_single_entry() {
        let config = config(
            "smtp",
            vec![("smtp", SenderEntry::direct("SmtpSender", "SmtpRepo"))],
        );

        let set = resolve_sender_set(&config).unwrap();
        assert_eq!(
            set,
            vec![ResolvedSender {
                name: "smtp".to_string(),
                sender_class: "SmtpSender".to_string(),
                repository_class: "SmtpRepo".to_string(),
            }]
        );
    }

    #[test]
    fn test_chain_resolves_in_declared_order() {
        let config = config(
            "failover",
            vec![
                ("failover", SenderEntry::chain(["primary", "backup"])),
                ("backup", SenderEntry::direct("B", "BRepo")),
                ("primary", SenderEntry::direct("A", "ARepo")),
            ],
        );

        let set = resolve_sender_set(&config).unwrap();
        let names: Vec<&str> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["primary", "backup"]);
    }

    #[test]
    fn test_repeated_chain_member_collapses() {
        let config = config(
            "failover",
            vec![
                (
                    "failover",
                    SenderEntry::chain(["primary", "backup", "primary"]),
                ),
                ("primary", SenderEntry::direct("A", "ARepo")),
                ("backup", SenderEntry::direct("B", "BRepo")),
            ],
        );

        let set = resolve_sender_set(&config).unwrap();
        let names: Vec<&str> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["primary", "backup"]);
    }

    #[test]
    fn test_unknown_main_sender_lists_known_names() {
        let config = config(
            "ghost",
            vec![
                ("smtp", SenderEntry::direct("A", "ARepo")),
                ("api", SenderEntry::direct("B", "BRepo")),
            ],
        );

        match resolve_sender_set(&config) {
            Err(ConfigError::UnknownSender { name, known }) => {
                assert_eq!(name, "ghost");
                assert_eq!(known, vec!["api", "smtp"]);
            }
            other => panic!("expected UnknownSender, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_chain_member_fails() {
        let config = config(
            "failover",
            vec![
                ("failover", SenderEntry::chain(["primary", "missing"])),
                ("primary", SenderEntry::direct("A", "ARepo")),
            ],
        );

        match resolve_sender_set(&config) {
            Err(ConfigError::UnknownSender { name, .. }) => assert_eq!(name, "missing"),
            other => panic!("expected UnknownSender, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_sender_class_fails() {
        let mut entry = SenderEntry::direct("A", "ARepo");
        entry.sender = None;
        let config = config("smtp", vec![("smtp", entry)]);

        match resolve_sender_set(&config) {
            Err(ConfigError::MissingSenderParts(name)) => assert_eq!(name, "smtp"),
            other => panic!("expected MissingSenderParts, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_repository_class_fails_inside_chain() {
        let mut backup = SenderEntry::direct("B", "BRepo");
        backup.repository = None;
        let config = config(
            "failover",
            vec![
                ("failover", SenderEntry::chain(["primary", "backup"])),
                ("primary", SenderEntry::direct("A", "ARepo")),
                ("backup", backup),
            ],
        );

        match resolve_sender_set(&config) {
            Err(ConfigError::MissingSenderParts(name)) => assert_eq!(name, "backup"),
            other => panic!("expected MissingSenderParts, got {other:?}"),
        }
    }
}
