use super::{Sender, SenderRepository};
use crate::error::DispatchError;
use crate::template::RenderedTemplate;
use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Output location for [`FileSender`]. Creates the directory up front and
/// hands out sequence numbers so concurrent deliveries get distinct file
/// names.
#[derive(Debug)]
pub struct FileRepository {
    output_dir: PathBuf,
    sequence: AtomicU64,
}

impl FileRepository {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, DispatchError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if !output_dir.exists() {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self {
            output_dir,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn next_path(&self, template: &str) -> PathBuf {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.output_dir.join(format!("{seq:06}-{template}.json"))
    }
}

impl SenderRepository for FileRepository {}

/// Writes each delivery to its repository's directory as a JSON document.
/// Useful as a development transport and as the tail of a failover chain.
pub struct FileSender {
    repository: Arc<FileRepository>,
}

impl FileSender {
    pub fn new(repository: Arc<dyn SenderRepository>) -> Result<Self, DispatchError> {
        let repository = repository.downcast_arc::<FileRepository>().map_err(|_| {
            DispatchError::Construction {
                class: "FileSender".to_string(),
                reason: "paired repository is not a FileRepository".to_string(),
            }
        })?;

        Ok(Self { repository })
    }
}

#[async_trait]
impl Sender for FileSender {
    async fn send(
        &self,
        template: &RenderedTemplate,
        email: &str,
    ) -> Result<bool, DispatchError> {
        let path = self.repository.next_path(template.template());

        let mut values = serde_json::Map::new();
        for (name, value) in template.iter() {
            values.insert(name.to_string(), value.clone());
        }
        let document = json!({
            "template": template.template(),
            "to": email,
            "values": values,
        });

        // Blocking filesystem write, same treatment as a sync transport.
        let contents = serde_json::to_vec_pretty(&document)
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        tokio::task::spawn_blocking(move || std::fs::write(path, contents))
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))??;

        Ok(true)
    }
}
