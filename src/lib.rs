pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::application::initialize::initialize;
pub use crate::application::recommend::get_recommendations;

use crate::application::catalog::{self, CatalogStats};
use crate::application::initialize::ModelLoader;
use crate::application::recommend::SimilarityRanker;
use crate::config::Settings;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::error::DomainError;
use crate::domain::ports::artifact_fetcher::ArtifactFetcher;
use crate::infrastructure::artifact::sqlite::{self, ArtifactMeta};
use crate::infrastructure::artifact::ArtifactFormat;
use crate::infrastructure::fetch::fetcher_for;
use crate::infrastructure::fetch::file::FileFetcher;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub path: PathBuf,
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub artifact: Option<ArtifactMeta>,
}

pub struct AniRec {
    loader: ModelLoader,
    default_k: usize,
}

impl AniRec {
    pub fn new() -> Result<Self, DomainError> {
        let settings = Settings::from_env()?;
        let fetcher: Arc<dyn ArtifactFetcher> = match settings.model_url.as_deref() {
            Some(url) => fetcher_for(url),
            None => Arc::new(FileFetcher),
        };
        Ok(Self::with_fetcher(settings, fetcher))
    }

    pub fn with_fetcher(settings: Settings, fetcher: Arc<dyn ArtifactFetcher>) -> Self {
        Self {
            loader: ModelLoader::new(fetcher, settings.model_path, settings.model_url),
            default_k: settings.top_k,
        }
    }

    async fn ranker(&self) -> Result<SimilarityRanker, DomainError> {
        Ok(SimilarityRanker::new(self.loader.store().await?))
    }

    pub async fn recommend(&self, title: &str, k: Option<usize>) -> Result<Vec<Recommendation>, DomainError> {
        self.ranker().await?.top_k(title, k.unwrap_or(self.default_k))
    }

    pub async fn titles(&self, contains: Option<&str>, limit: Option<usize>) -> Result<Vec<String>, DomainError> {
        let store = self.loader.store().await?;
        Ok(catalog::titles(&store, contains, limit))
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<String>, DomainError> {
        let store = self.loader.store().await?;
        Ok(catalog::suggest(&store, query))
    }

    pub async fn info(&self) -> Result<ModelInfo, DomainError> {
        let store = self.loader.store().await?;
        let path = self.loader.model_path().to_path_buf();
        Ok(ModelInfo {
            artifact: sqlite_meta(&path),
            stats: catalog::stats(&store),
            path,
        })
    }

    pub async fn fetch(&self) -> Result<PathBuf, DomainError> {
        self.loader.ensure_artifact().await
    }

    pub fn pack(json_path: &Path, out_path: &Path) -> Result<usize, DomainError> {
        application::pack::pack(json_path, out_path)
    }
}

fn sqlite_meta(path: &Path) -> Option<ArtifactMeta> {
    let mut head = Vec::with_capacity(16);
    std::fs::File::open(path).ok()?.take(16).read_to_end(&mut head).ok()?;
    match ArtifactFormat::detect(&head) {
        ArtifactFormat::Sqlite => sqlite::read_meta(path).ok(),
        ArtifactFormat::Json => None,
    }
}
