use crate::domain::ports::artifact_fetcher::ArtifactFetcher;

/// Reads artifacts from `file://` URLs or bare paths.
pub struct FileFetcher;

#[async_trait::async_trait]
impl ArtifactFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        tokio::fs::read(path)
            .await
            .map_err(|e| format!("Cannot read {path}: {e}"))
    }
}
