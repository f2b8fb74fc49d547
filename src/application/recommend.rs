use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::error::DomainError;
use crate::domain::values::similarity::{cosine_with_norms, rank_order};
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 10;

/// Dense cosine-similarity ranking over a shared, read-only store.
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    store: Arc<EmbeddingStore>,
}

impl SimilarityRanker {
    pub fn new(store: Arc<EmbeddingStore>) -> Self {
        Self { store }
    }

    /// Returns up to `k` items most similar to `query_title`, best first.
    ///
    /// `k` is clamped to `N - 1`. The query itself is never returned, rows
    /// with a zero vector score negative infinity, and equal scores are
    /// ordered by ascending row index.
    pub fn top_k(&self, query_title: &str, k: usize) -> Result<Vec<Recommendation>, DomainError> {
        let store = &*self.store;
        let q = store.resolve_index(query_title)?;
        let k = k.min(store.size() - 1);
        if k == 0 {
            return Ok(vec![]);
        }

        let query = store.vector(q)?;
        let query_norm = store.norm(q)?;
        let mut scores: Vec<(usize, f64)> = store
            .rows()
            .filter(|(i, _, _)| *i != q)
            .map(|(i, row, norm)| (i, cosine_with_norms(row, norm, query, query_norm)))
            .collect();

        if k < scores.len() {
            scores.select_nth_unstable_by(k - 1, rank_order);
            scores.truncate(k);
        }
        scores.sort_by(rank_order);

        tracing::debug!(query = query_title, k, "ranked neighbours");

        scores
            .into_iter()
            .map(|(index, score)| {
                Ok(Recommendation {
                    index,
                    title: store.resolve_title(index)?.to_string(),
                    score,
                })
            })
            .collect()
    }
}

/// Titles of the `k` nearest neighbours of `query_title`, in rank order.
pub fn get_recommendations(
    store: &Arc<EmbeddingStore>,
    query_title: &str,
    k: usize,
) -> Result<Vec<String>, DomainError> {
    Ok(SimilarityRanker::new(store.clone())
        .top_k(query_title, k)?
        .into_iter()
        .map(|r| r.title)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker(rows: &[(&str, Vec<f32>)]) -> SimilarityRanker {
        let store = EmbeddingStore::from_rows(
            rows.iter().map(|(t, _)| t.to_string()).collect(),
            rows.iter().map(|(_, v)| v.clone()).collect(),
        )
        .unwrap();
        SimilarityRanker::new(Arc::new(store))
    }

    #[test]
    fn test_basic_example() {
        let r = ranker(&[("A", vec![1.0, 0.0]), ("B", vec![1.0, 0.0]), ("C", vec![0.0, 1.0])]);
        let result = r.top_k("A", 2).unwrap();
        let titles: Vec<_> = result.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert!((result[0].score - 1.0).abs() < 1e-9);
        assert_eq!(result[1].score, 0.0);
    }

    #[test]
    fn test_clamps_k() {
        let r = ranker(&[("A", vec![1.0, 0.0]), ("B", vec![0.5, 0.5]), ("C", vec![0.0, 1.0])]);
        assert_eq!(r.top_k("A", 50).unwrap().len(), 2);
    }

    #[test]
    fn test_zero_k_and_single_item() {
        let r = ranker(&[("A", vec![1.0, 0.0]), ("B", vec![0.5, 0.5])]);
        assert!(r.top_k("A", 0).unwrap().is_empty());

        let single = ranker(&[("Only", vec![1.0])]);
        assert!(single.top_k("Only", 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_query_vector_ranks_by_index() {
        let r = ranker(&[("Z", vec![0.0, 0.0]), ("A", vec![1.0, 0.0]), ("B", vec![0.0, 1.0])]);
        let result = r.top_k("Z", 2).unwrap();
        assert_eq!(result.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 2]);
        assert!(result.iter().all(|r| r.score == f64::NEG_INFINITY));
    }

    #[test]
    fn test_partial_selection_matches_full_sort() {
        let rows: Vec<(String, Vec<f32>)> = (0..40)
            .map(|i| (format!("t{i}"), vec![(i % 7) as f32 + 1.0, (i % 5) as f32]))
            .collect();
        let borrowed: Vec<(&str, Vec<f32>)> = rows.iter().map(|(t, v)| (t.as_str(), v.clone())).collect();
        let r = ranker(&borrowed);
        let all = r.top_k("t3", 39).unwrap();
        let top = r.top_k("t3", 5).unwrap();
        assert_eq!(&all[..5], &top[..]);
    }

    #[test]
    fn test_get_recommendations_returns_titles() {
        let store = Arc::new(
            EmbeddingStore::from_rows(
                vec!["A".into(), "B".into(), "C".into()],
                vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]],
            )
            .unwrap(),
        );
        assert_eq!(get_recommendations(&store, "C", DEFAULT_TOP_K).unwrap(), vec!["B", "A"]);
    }
}
