pub mod json;
pub mod migrations;
pub mod sqlite;

use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::error::DomainError;
use std::path::{Path, PathBuf};

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";

/// Where a serialized model comes from.
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Sqlite,
}

impl ArtifactFormat {
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(SQLITE_MAGIC) {
            ArtifactFormat::Sqlite
        } else {
            ArtifactFormat::Json
        }
    }
}

/// Decodes an artifact into an [`EmbeddingStore`].
pub fn load(source: &ArtifactSource) -> Result<EmbeddingStore, DomainError> {
    match source {
        ArtifactSource::Path(path) => load_path(path),
        ArtifactSource::Bytes(bytes) => match ArtifactFormat::detect(bytes) {
            ArtifactFormat::Json => json::decode(bytes),
            ArtifactFormat::Sqlite => Err(DomainError::ArtifactLoad(
                "SQLite artifacts must be loaded from a path".into(),
            )),
        },
    }
}

fn load_path(path: &Path) -> Result<EmbeddingStore, DomainError> {
    let bytes = std::fs::read(path).map_err(|e| {
        DomainError::ArtifactLoad(format!("cannot read {}: {e}", path.display()))
    })?;
    let format = ArtifactFormat::detect(&bytes);
    tracing::info!(path = %path.display(), ?format, bytes = bytes.len(), "loading artifact");
    match format {
        ArtifactFormat::Json => json::decode(&bytes),
        ArtifactFormat::Sqlite => {
            drop(bytes);
            sqlite::read(path)
        }
    }
}
