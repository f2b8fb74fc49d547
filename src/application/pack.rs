use crate::domain::error::DomainError;
use crate::infrastructure::artifact::{json, sqlite};
use std::path::Path;

/// Converts a JSON artifact into the SQLite artifact encoding.
pub fn pack(json_path: &Path, out_path: &Path) -> Result<usize, DomainError> {
    let bytes = std::fs::read(json_path).map_err(|e| {
        DomainError::ArtifactLoad(format!("cannot read {}: {e}", json_path.display()))
    })?;
    let store = json::decode(&bytes)?;
    sqlite::write(&store, out_path)
}
