pub mod embedding_store;
pub mod recommendation;
