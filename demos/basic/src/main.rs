//! Failover demo: a declining primary sender falls back to a file-backed
//! sender that writes the rendered email to a temp directory.

use mailwire::prelude::*;
use mailwire::{FileRepository, FileSender, MemoryRepository, MemorySender};
use serde_json::{Value, json};
use std::sync::Arc;

struct WelcomeOptions {
    message: String,
    name: String,
}

impl TemplateOptions for WelcomeOptions {}

struct GreetingParameter;

impl TemplateParameter for GreetingParameter {
    fn name(&self) -> &str {
        "greeting"
    }

    fn description(&self) -> &str {
        "Personal greeting line."
    }

    fn value(&self, options: &dyn TemplateOptions) -> Value {
        match options.downcast_ref::<WelcomeOptions>() {
            Some(options) => json!(format!("Hello {}!", options.name)),
            None => Value::Null,
        }
    }
}

struct MessageParameter;

impl TemplateParameter for MessageParameter {
    fn name(&self) -> &str {
        "message"
    }

    fn description(&self) -> &str {
        "Body of the email, bolded."
    }

    fn value(&self, options: &dyn TemplateOptions) -> Value {
        match options.downcast_ref::<WelcomeOptions>() {
            Some(options) => json!(format!("<b>{}</b>", options.message)),
            None => Value::Null,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = EngineConfig::from_yaml(
        r#"
main_sender: failover
senders:
  failover:
    chain:
      senders: [primary, backup]
  primary:
    sender: { class: UnreliableSender }
    repository: { class: UnreliableRepository }
  backup:
    sender: { class: FileSender }
    repository: { class: FileRepository }
templates:
  - welcome
"#,
    )
    .expect("config should parse");

    let outbox_dir = tempfile::tempdir().expect("temp dir");
    let primary = Arc::new(MemoryRepository::new("noreply@example.com"));
    let file_repository =
        Arc::new(FileRepository::new(outbox_dir.path()).expect("output dir should be writable"));

    let engine = EngineBuilder::new()
        .with_repository("UnreliableRepository", {
            let primary = primary.clone();
            move || {
                let repository: Arc<dyn SenderRepository> = primary.clone();
                Ok(repository)
            }
        })
        .with_sender("UnreliableSender", |repository| {
            let sender: Arc<dyn Sender> = Arc::new(MemorySender::declining(repository)?);
            Ok(sender)
        })
        .with_repository("FileRepository", {
            let file_repository = file_repository.clone();
            move || {
                let repository: Arc<dyn SenderRepository> = file_repository.clone();
                Ok(repository)
            }
        })
        .with_sender("FileSender", |repository| {
            let sender: Arc<dyn Sender> = Arc::new(FileSender::new(repository)?);
            Ok(sender)
        })
        .with_template(TemplateRegistration::with_parameters(
            "welcome",
            vec![Arc::new(GreetingParameter), Arc::new(MessageParameter)],
        ))
        .build(&config)
        .expect("wiring should succeed");

    let options = WelcomeOptions {
        message: "Your account is ready.".to_string(),
        name: "Ada".to_string(),
    };

    let sent = engine
        .mailer()
        .send("welcome", &options, "ada@example.com")
        .await
        .expect("welcome template is wired");

    println!("dispatched: {sent}");
    for entry in std::fs::read_dir(outbox_dir.path()).expect("outbox dir") {
        let path = entry.expect("dir entry").path();
        println!("--- {}", path.display());
        println!("{}", std::fs::read_to_string(path).expect("outbox file"));
    }
}
