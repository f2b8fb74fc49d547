use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Index {index} out of range for catalog of {size} items")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    /// True for errors the host should present to the user and re-prompt on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::UnknownItem(_))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::ArtifactLoad(format!("SQLite: {e}"))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::ArtifactLoad(format!("JSON: {e}"))
    }
}
