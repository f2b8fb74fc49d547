use crate::domain::entities::embedding_store::EmbeddingStore;
use serde::Serialize;

pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub items: usize,
    pub dimension: usize,
    pub zero_vectors: usize,
}

pub fn stats(store: &EmbeddingStore) -> CatalogStats {
    CatalogStats {
        items: store.size(),
        dimension: store.dimension(),
        zero_vectors: store.zero_rows(),
    }
}

/// Catalog titles in row order, optionally filtered by a case-insensitive
/// substring.
pub fn titles(store: &EmbeddingStore, contains: Option<&str>, limit: Option<usize>) -> Vec<String> {
    let needle = contains.map(str::to_lowercase);
    store
        .titles()
        .iter()
        .filter(|t| match &needle {
            Some(n) => t.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Titles to offer when a query does not resolve exactly.
pub fn suggest(store: &EmbeddingStore, query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }
    titles(store, Some(query), Some(MAX_SUGGESTIONS))
}
