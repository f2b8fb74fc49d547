use crate::domain::error::DomainError;
use crate::domain::values::similarity::l2_norm;
use std::collections::HashMap;

/// Immutable item catalog plus its N x D embedding matrix.
///
/// Rows are stored contiguously in catalog order. Row norms are computed once
/// at construction so ranking only needs the dot products.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    titles: Vec<String>,
    index: HashMap<String, usize>,
    dimension: usize,
    values: Vec<f32>,
    norms: Vec<f64>,
}

impl EmbeddingStore {
    pub fn new(titles: Vec<String>, dimension: usize, values: Vec<f32>) -> Result<Self, DomainError> {
        if titles.is_empty() {
            return Err(DomainError::ArtifactLoad("catalog is empty".into()));
        }
        if dimension == 0 {
            return Err(DomainError::ArtifactLoad("embedding dimension must be > 0".into()));
        }
        let expected = titles.len().checked_mul(dimension).ok_or_else(|| {
            DomainError::ArtifactLoad("embedding matrix size overflows".into())
        })?;
        if values.len() != expected {
            return Err(DomainError::ArtifactLoad(format!(
                "matrix has {} values but {} titles x {dimension} dimensions needs {expected}",
                values.len(),
                titles.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::ArtifactLoad(format!(
                "non-finite value in row {} ({})",
                pos / dimension,
                titles[pos / dimension]
            )));
        }

        let mut index = HashMap::with_capacity(titles.len());
        for (i, title) in titles.iter().enumerate() {
            if index.insert(title.clone(), i).is_some() {
                return Err(DomainError::ArtifactLoad(format!("duplicate title: {title}")));
            }
        }

        let norms: Vec<f64> = values.chunks_exact(dimension).map(l2_norm).collect();
        let zero_rows = norms.iter().filter(|n| **n == 0.0).count();
        if zero_rows > 0 {
            tracing::warn!(zero_rows, "catalog contains zero vectors; they will rank last");
        }

        Ok(Self { titles, index, dimension, values, norms })
    }

    /// Builds a store from one vector per title.
    pub fn from_rows(titles: Vec<String>, rows: Vec<Vec<f32>>) -> Result<Self, DomainError> {
        if rows.len() != titles.len() {
            return Err(DomainError::ArtifactLoad(format!(
                "{} titles but {} embedding rows",
                titles.len(),
                rows.len()
            )));
        }
        let dimension = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(i) = rows.iter().position(|r| r.len() != dimension) {
            return Err(DomainError::ArtifactLoad(format!(
                "row {i} has {} dimensions, expected {dimension}",
                rows[i].len()
            )));
        }
        Self::new(titles, dimension, rows.into_iter().flatten().collect())
    }

    pub fn resolve_index(&self, title: &str) -> Result<usize, DomainError> {
        self.index
            .get(title)
            .copied()
            .ok_or_else(|| DomainError::UnknownItem(title.to_string()))
    }

    pub fn resolve_title(&self, index: usize) -> Result<&str, DomainError> {
        self.titles
            .get(index)
            .map(String::as_str)
            .ok_or(DomainError::IndexOutOfRange { index, size: self.size() })
    }

    pub fn vector(&self, index: usize) -> Result<&[f32], DomainError> {
        self.check_index(index)?;
        let start = index * self.dimension;
        Ok(&self.values[start..start + self.dimension])
    }

    pub fn norm(&self, index: usize) -> Result<f64, DomainError> {
        self.check_index(index)?;
        Ok(self.norms[index])
    }

    pub fn size(&self) -> usize {
        self.titles.len()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Titles in catalog (row) order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn zero_rows(&self) -> usize {
        self.norms.iter().filter(|n| **n == 0.0).count()
    }

    /// Iterates `(index, row, norm)` in catalog order.
    pub(crate) fn rows(&self) -> impl Iterator<Item = (usize, &[f32], f64)> {
        self.values
            .chunks_exact(self.dimension)
            .zip(self.norms.iter())
            .enumerate()
            .map(|(i, (row, norm))| (i, row, *norm))
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.size() {
            return Err(DomainError::IndexOutOfRange { index, size: self.size() });
        }
        Ok(())
    }
}
