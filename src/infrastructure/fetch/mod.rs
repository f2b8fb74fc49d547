pub mod file;
pub mod http;

use crate::domain::ports::artifact_fetcher::ArtifactFetcher;
use std::sync::Arc;

/// Picks a fetcher for `url` by scheme: `http(s)://` goes over the network,
/// anything else is read from the local filesystem.
pub fn fetcher_for(url: &str) -> Arc<dyn ArtifactFetcher> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Arc::new(http::HttpFetcher::new())
    } else {
        Arc::new(file::FileFetcher)
    }
}
