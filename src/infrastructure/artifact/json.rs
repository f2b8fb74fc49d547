use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::error::DomainError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JsonArtifact {
    pub titles: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
}

pub fn decode(bytes: &[u8]) -> Result<EmbeddingStore, DomainError> {
    let artifact: JsonArtifact = serde_json::from_slice(bytes)?;
    EmbeddingStore::from_rows(artifact.titles, artifact.embeddings)
}
