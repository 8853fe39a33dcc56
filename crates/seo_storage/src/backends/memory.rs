use std::path::PathBuf;
use async_trait::async_trait;
use chrono::Local;
use tokio::sync::RwLock;
use seo_core::{Artifact, Report, ReportStore, Result};
use crate::ArtifactKind;

/// Keeps artifacts in memory; paths are synthetic `memory://` names.
#[derive(Default)]
pub struct MemoryStore {
    artifacts: RwLock<Vec<(PathBuf, Artifact)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every artifact saved so far, oldest first.
    pub async fn artifacts(&self) -> Vec<(PathBuf, Artifact)> {
        self.artifacts.read().await.clone()
    }

    async fn push(&self, kind: ArtifactKind, artifact: Artifact) -> PathBuf {
        let mut artifacts = self.artifacts.write().await;
        let path = PathBuf::from(format!(
            "memory://{}/{}",
            artifacts.len(),
            kind.file_name(Local::now())
        ));
        artifacts.push((path.clone(), artifact));
        path
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn save_report(&self, report: &Report) -> Result<PathBuf> {
        Ok(self.push(ArtifactKind::Single, Artifact::Single(report.clone())).await)
    }

    async fn save_batch(&self, reports: &[Report]) -> Result<PathBuf> {
        Ok(self.push(ArtifactKind::Batch, Artifact::Batch(reports.to_vec())).await)
    }

    async fn latest_path(&self) -> Result<Option<PathBuf>> {
        Ok(self.artifacts.read().await.last().map(|(path, _)| path.clone()))
    }

    async fn load_latest(&self) -> Result<Option<Artifact>> {
        Ok(self.artifacts.read().await.last().map(|(_, artifact)| artifact.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_core::{ArticleContent, PageSpeed, SeoEvaluation};

    fn report(url: &str) -> Report {
        Report::assemble(
            ArticleContent {
                url: url.to_string(),
                title: "Title".to_string(),
                subheadings: vec![],
                body: String::new(),
            },
            SeoEvaluation::degraded(),
            PageSpeed::no_data(),
        )
    }

    #[tokio::test]
    async fn test_latest_tracks_last_write() {
        let store = MemoryStore::new();
        assert!(store.latest_path().await.unwrap().is_none());

        let first = store.save_report(&report("https://a.example")).await.unwrap();
        let second = store
            .save_batch(&[report("https://b.example"), report("https://c.example")])
            .await
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(store.latest_path().await.unwrap(), Some(second));

        let latest = store.load_latest().await.unwrap().unwrap();
        assert_eq!(latest.reports().len(), 2);
        assert_eq!(store.artifacts().await.len(), 2);
    }
}
