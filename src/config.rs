use crate::application::recommend::DEFAULT_TOP_K;
use crate::domain::error::DomainError;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "./model.sqlite";

/// Runtime settings, read from `ANIREC_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model_path: PathBuf,
    pub model_url: Option<String>,
    pub top_k: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_url: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let defaults = Self::default();
        let model_path = lookup("ANIREC_MODEL_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);
        let model_url = lookup("ANIREC_MODEL_URL").filter(|s| !s.is_empty());
        let top_k = match lookup("ANIREC_TOP_K") {
            None => defaults.top_k,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(k) if k > 0 => k,
                _ => {
                    return Err(DomainError::Config(format!(
                        "ANIREC_TOP_K must be a positive integer, got '{raw}'"
                    )))
                }
            },
        };
        Ok(Self { model_path, model_url, top_k })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert!(s.model_url.is_none());
        assert_eq!(s.top_k, 10);
    }

    #[test]
    fn test_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("ANIREC_MODEL_PATH", "/tmp/m.sqlite"),
            ("ANIREC_MODEL_URL", "https://example.com/m.sqlite"),
            ("ANIREC_TOP_K", "5"),
        ]))
        .unwrap();
        assert_eq!(s.model_path, PathBuf::from("/tmp/m.sqlite"));
        assert_eq!(s.model_url.as_deref(), Some("https://example.com/m.sqlite"));
        assert_eq!(s.top_k, 5);
    }

    #[test]
    fn test_rejects_bad_top_k() {
        for bad in ["0", "-1", "ten"] {
            let err = Settings::from_lookup(lookup(&[("ANIREC_TOP_K", bad)])).unwrap_err();
            assert!(matches!(err, DomainError::Config(_)));
        }
    }
}
