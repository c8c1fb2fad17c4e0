//! Plan document kept as a pretty-printed JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use planner_common::PlanDocument;
use tempfile::NamedTempFile;

use crate::document::DocumentStore;
use crate::error::{StoreError, StoreResult};

pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> StoreResult<Option<PlanDocument>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn replace(&self, doc: &PlanDocument) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

/// Write to a sibling temp file, then rename over the target. Readers see
/// either the old document or the new one, never a truncated file.
fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
