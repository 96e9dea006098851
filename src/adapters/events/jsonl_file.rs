//! JSON-lines event publisher - Appends events to a file on disk.
//!
//! One envelope per line, in publish order. The parent directory is created
//! on first write.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Append-only JSON-lines file sink.
#[derive(Debug)]
pub struct JsonLinesEventPublisher {
    path: PathBuf,
    // Serializes appends so concurrent publishes never interleave a line.
    write_lock: Mutex<()>,
}

impl JsonLinesEventPublisher {
    /// Create a publisher writing to `path`
    ///
    /// # Example
    /// ```ignore
    /// let sink = JsonLinesEventPublisher::new("./data/audit.jsonl");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<(), DomainError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error("create audit directory", e)),
            _ => Ok(()),
        }
    }
}

fn io_error(action: &str, err: std::io::Error) -> DomainError {
    DomainError::new(
        ErrorCode::AuditSinkError,
        format!("Failed to {}: {}", action, err),
    )
}

#[async_trait]
impl EventPublisher for JsonLinesEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let mut line = serde_json::to_vec(&event).map_err(|e| {
            DomainError::new(
                ErrorCode::AuditSinkError,
                format!("Failed to serialize event: {}", e),
            )
        })?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        self.ensure_parent().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| io_error("open audit file", e))?;

        file.write_all(&line)
            .await
            .map_err(|e| io_error("append audit record", e))?;
        file.flush()
            .await
            .map_err(|e| io_error("flush audit file", e))?;

        Ok(())
    }
}
