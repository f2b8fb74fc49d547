pub mod artifact_fetcher;
