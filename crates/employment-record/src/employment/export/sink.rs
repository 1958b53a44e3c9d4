use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

/// Destination for a finished export document (browser download, disk, ...).
///
/// Delivery is a single awaited call: it either completes or fails as a whole.
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn deliver(&self, bytes: &[u8], filename: &str) -> Result<DeliveryReceipt, SinkError>;
}

/// Confirmation returned by a sink after a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub filename: String,
    pub bytes_written: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink rejected '{filename}': {reason}")]
    Rejected { filename: String, reason: String },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Filenames must stay inside the sink's target; no separators or parent references.
fn ensure_plain_filename(filename: &str) -> Result<(), SinkError> {
    let reason = if filename.is_empty() {
        Some("empty filename")
    } else if filename.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if filename == "." || filename == ".." {
        Some("relative path components are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SinkError::Rejected {
            filename: filename.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Writes export documents into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn deliver(&self, bytes: &[u8], filename: &str) -> Result<DeliveryReceipt, SinkError> {
        ensure_plain_filename(filename)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| SinkError::Io {
                path: self.root.clone(),
                source,
            })?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = bytes.len(), "export document written");

        Ok(DeliveryReceipt {
            filename: filename.to_string(),
            bytes_written: bytes.len(),
            location: Some(path.display().to_string()),
        })
    }
}

/// Document captured by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Buffers delivered documents in memory, e.g. to stream them back as an HTTP download.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<DeliveredDocument>>,
}

impl MemorySink {
    /// Removes and returns the most recent document delivered under `filename`.
    pub fn take(&self, filename: &str) -> Option<DeliveredDocument> {
        let mut guard = self.documents.lock().ok()?;
        let index = guard.iter().rposition(|document| document.filename == filename)?;
        Some(guard.remove(index))
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn deliver(&self, bytes: &[u8], filename: &str) -> Result<DeliveryReceipt, SinkError> {
        ensure_plain_filename(filename)?;

        let mut guard = self
            .documents
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink lock poisoned".to_string()))?;
        guard.push(DeliveredDocument {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
        debug!(filename, bytes = bytes.len(), "export document buffered");

        Ok(DeliveryReceipt {
            filename: filename.to_string(),
            bytes_written: bytes.len(),
            location: None,
        })
    }
}
