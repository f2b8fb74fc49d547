use serde::{Deserialize, Serialize};

/// One ranked neighbour of a query item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub index: usize,
    pub title: String,
    pub score: f64,
}
