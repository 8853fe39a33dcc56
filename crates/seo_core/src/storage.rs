use async_trait::async_trait;
use std::path::PathBuf;
use crate::types::{Artifact, Report};
use crate::Result;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists one report and points the latest-result pointer at it
    async fn save_report(&self, report: &Report) -> Result<PathBuf>;

    /// Persists a batch of reports as a single artifact
    async fn save_batch(&self, reports: &[Report]) -> Result<PathBuf>;

    /// Location of the most recently written artifact, if any
    async fn latest_path(&self) -> Result<Option<PathBuf>>;

    /// Loads the artifact the pointer refers to
    async fn load_latest(&self) -> Result<Option<Artifact>>;
}
