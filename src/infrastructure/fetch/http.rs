use crate::domain::ports::artifact_fetcher::ArtifactFetcher;
use reqwest::Client;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Download error: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Download {status}: {body}"));
        }

        let bytes = resp.bytes().await.map_err(|e| format!("Download body error: {e}"))?;
        Ok(bytes.to_vec())
    }
}
