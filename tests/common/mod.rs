//! Shared test helpers.
#![allow(dead_code)]

use anirec::config::Settings;
use anirec::domain::entities::embedding_store::EmbeddingStore;
use anirec::domain::ports::artifact_fetcher::ArtifactFetcher;
use anirec::infrastructure::fetch::file::FileFetcher;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn store(rows: &[(&str, &[f32])]) -> Arc<EmbeddingStore> {
    Arc::new(
        EmbeddingStore::from_rows(
            rows.iter().map(|(t, _)| t.to_string()).collect(),
            rows.iter().map(|(_, v)| v.to_vec()).collect(),
        )
        .unwrap(),
    )
}

/// A small catalog with a few obvious clusters.
pub fn anime_store() -> Arc<EmbeddingStore> {
    store(&[
        ("Cowboy Bebop", &[0.9, 0.1, 0.0, 0.2]),
        ("Trigun", &[0.8, 0.2, 0.1, 0.3]),
        ("Samurai Champloo", &[0.85, 0.15, 0.05, 0.1]),
        ("Clannad", &[0.0, 0.9, 0.3, 0.1]),
        ("Toradora!", &[0.1, 0.8, 0.4, 0.0]),
        ("Mushishi", &[0.1, 0.2, 0.9, 0.4]),
        ("Natsume's Book of Friends", &[0.0, 0.3, 0.8, 0.5]),
        ("Ghost in the Shell", &[0.7, 0.0, 0.2, 0.8]),
    ])
}

pub fn json_artifact(titles: &[&str], rows: &[&[f32]]) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "titles": titles,
        "embeddings": rows,
    }))
    .unwrap()
}

pub fn write_json_artifact(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        json_artifact(
            &["A", "B", "C", "D"],
            &[&[1.0, 0.0], &[0.9, 0.1], &[0.0, 1.0], &[0.5, 0.5]],
        ),
    )
    .unwrap();
    path
}

pub fn settings(model_path: PathBuf, model_url: Option<String>) -> Settings {
    Settings { model_path, model_url, ..Settings::default() }
}

/// File fetcher that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingFetcher {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl CountingFetcher {
    pub fn failing() -> Self {
        Self { calls: AtomicUsize::new(0), fail: true }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ArtifactFetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("simulated outage".into());
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        FileFetcher.fetch(url).await
    }
}
