use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::error::DomainError;
use crate::domain::ports::artifact_fetcher::ArtifactFetcher;
use crate::infrastructure::artifact::{self, ArtifactSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Builds a store from an artifact path or in-memory bytes.
pub fn initialize(source: ArtifactSource) -> Result<EmbeddingStore, DomainError> {
    let store = artifact::load(&source)?;
    tracing::info!(items = store.size(), dimension = store.dimension(), "embedding store ready");
    Ok(store)
}

/// Fetches the artifact into a local cache file at most once and loads it at
/// most once per loader.
pub struct ModelLoader {
    fetcher: Arc<dyn ArtifactFetcher>,
    model_path: PathBuf,
    model_url: Option<String>,
    store: OnceCell<Arc<EmbeddingStore>>,
}

impl ModelLoader {
    pub fn new(fetcher: Arc<dyn ArtifactFetcher>, model_path: PathBuf, model_url: Option<String>) -> Self {
        Self { fetcher, model_path, model_url, store: OnceCell::new() }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Downloads the artifact unless the cache file already exists.
    pub async fn ensure_artifact(&self) -> Result<PathBuf, DomainError> {
        if tokio::fs::try_exists(&self.model_path).await? {
            tracing::debug!(path = %self.model_path.display(), "using cached artifact");
            return Ok(self.model_path.clone());
        }

        let url = self.model_url.as_deref().ok_or_else(|| {
            DomainError::ArtifactLoad(format!(
                "no artifact at {} and ANIREC_MODEL_URL is not set",
                self.model_path.display()
            ))
        })?;

        tracing::info!(url, path = %self.model_path.display(), "downloading artifact");
        let bytes = self.fetcher.fetch(url).await.map_err(DomainError::Fetch)?;

        if let Some(parent) = self.model_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut partial = self.model_path.clone().into_os_string();
        partial.push(".part");
        let partial = PathBuf::from(partial);
        tokio::fs::write(&partial, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&partial, &self.model_path).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        tracing::info!(bytes = bytes.len(), "artifact cached");
        Ok(self.model_path.clone())
    }

    /// Returns the shared store, fetching and loading it on first use.
    /// A failed attempt is not cached.
    pub async fn store(&self) -> Result<Arc<EmbeddingStore>, DomainError> {
        self.store
            .get_or_try_init(|| async {
                let path = self.ensure_artifact().await?;
                let store = tokio::task::spawn_blocking(move || initialize(ArtifactSource::Path(path)))
                    .await
                    .map_err(|e| DomainError::ArtifactLoad(format!("loader task failed: {e}")))??;
                Ok::<_, DomainError>(Arc::new(store))
            })
            .await
            .cloned()
    }
}
