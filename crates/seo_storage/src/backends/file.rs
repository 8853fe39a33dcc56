use std::path::{Path, PathBuf};
use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use seo_core::{Artifact, Error, Report, ReportStore, Result};
use crate::{ArtifactKind, StorageConfig};

/// Writes artifacts as pretty-printed JSON files and keeps the pointer file current.
pub struct FileStore {
    config: StorageConfig,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    async fn write_artifact<T: Serialize + ?Sized>(&self, kind: ArtifactKind, payload: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(payload)?;

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| storage_error("create output directory", &self.config.output_dir, e))?;

        let path = self.config.output_dir.join(kind.file_name(Local::now()));
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| storage_error("write artifact", &path, e))?;

        // Pointer goes last so readers never see a path to a missing file.
        if let Some(parent) = self.config.pointer_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create pointer directory", parent, e))?;
        }
        tokio::fs::write(&self.config.pointer_file, path.to_string_lossy().as_bytes())
            .await
            .map_err(|e| storage_error("write pointer file", &self.config.pointer_file, e))?;

        info!("💾 Result saved to {}", path.display());
        Ok(path)
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> Error {
    Error::Storage(format!("failed to {} {}: {}", action, path.display(), err))
}

#[async_trait]
impl ReportStore for FileStore {
    async fn save_report(&self, report: &Report) -> Result<PathBuf> {
        self.write_artifact(ArtifactKind::Single, report).await
    }

    async fn save_batch(&self, reports: &[Report]) -> Result<PathBuf> {
        self.write_artifact(ArtifactKind::Batch, reports).await
    }

    async fn latest_path(&self) -> Result<Option<PathBuf>> {
        match tokio::fs::read_to_string(&self.config.pointer_file).await {
            Ok(contents) => {
                let line = contents.trim();
                Ok((!line.is_empty()).then(|| PathBuf::from(line)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read pointer file", &self.config.pointer_file, e)),
        }
    }

    async fn load_latest(&self) -> Result<Option<Artifact>> {
        let Some(path) = self.latest_path().await? else {
            return Ok(None);
        };
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| storage_error("read artifact", &path, e))?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}
