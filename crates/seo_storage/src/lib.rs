use std::path::PathBuf;
use std::sync::Arc;
use chrono::{DateTime, Local};
use seo_core::{Error, ReportStore, Result};

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory receiving one JSON artifact per run
    pub output_dir: PathBuf,
    /// Single-line file holding the path of the latest artifact
    pub pointer_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output_files"),
            pointer_file: PathBuf::from("last_result.txt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Single,
    Batch,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Single => "resultado",
            ArtifactKind::Batch => "avaliacoes_seo_completas",
        }
    }

    /// Artifact file name stamped to the second, e.g. `resultado_20240501_134502.json`.
    pub fn file_name(&self, at: DateTime<Local>) -> String {
        format!("{}_{}.json", self.prefix(), at.format("%Y%m%d_%H%M%S"))
    }
}

/// Builds the store named by `kind` (`file` or `memory`).
pub fn create_store(kind: &str, config: StorageConfig) -> Result<Arc<dyn ReportStore>> {
    match kind {
        "file" => Ok(Arc::new(FileStore::new(config))),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, ArtifactKind, StorageConfig};
}
