use crate::domain::entities::embedding_store::EmbeddingStore;
use crate::domain::error::DomainError;
use crate::infrastructure::artifact::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::path::Path;

/// Contents of the `meta` table.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMeta {
    pub dimension: usize,
    pub items: Option<usize>,
    pub created_at: Option<DateTime<Utc>>,
}

fn serialize_vector(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn open_read_only(path: &Path) -> Result<Connection, DomainError> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|e| {
        DomainError::ArtifactLoad(format!("cannot open {}: {e}", path.display()))
    })
}

fn meta_value(conn: &Connection, key: &str) -> Result<Option<String>, DomainError> {
    Ok(conn
        .query_row("SELECT value FROM meta WHERE key = ?1", params![key], |r| r.get(0))
        .optional()?)
}

fn query_meta(conn: &Connection) -> Result<ArtifactMeta, DomainError> {
    let dimension = meta_value(conn, "dimension")?
        .ok_or_else(|| DomainError::ArtifactLoad("meta table has no dimension".into()))?
        .parse::<usize>()
        .map_err(|e| DomainError::ArtifactLoad(format!("invalid dimension in meta: {e}")))?;
    let items = meta_value(conn, "items")?
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| DomainError::ArtifactLoad(format!("invalid items in meta: {e}")))?;
    let created_at = meta_value(conn, "created_at")?.and_then(|s| {
        match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                tracing::warn!(value = %s, error = %e, "ignoring unparseable created_at in artifact meta");
                None
            }
        }
    });
    Ok(ArtifactMeta { dimension, items, created_at })
}

pub fn read_meta(path: &Path) -> Result<ArtifactMeta, DomainError> {
    query_meta(&open_read_only(path)?)
}

pub fn read(path: &Path) -> Result<EmbeddingStore, DomainError> {
    let conn = open_read_only(path)?;
    let meta = query_meta(&conn)?;
    let row_bytes = meta.dimension.checked_mul(4).ok_or_else(|| {
        DomainError::ArtifactLoad(format!("dimension {} in meta is too large", meta.dimension))
    })?;

    let mut stmt = conn.prepare("SELECT idx, title, vector FROM items ORDER BY idx")?;
    let rows = stmt.query_map([], |row| {
        let idx: i64 = row.get(0)?;
        let title: String = row.get(1)?;
        let blob: Vec<u8> = row.get(2)?;
        Ok((idx, title, blob))
    })?;

    let mut titles = Vec::new();
    let mut values = Vec::new();
    for (expected, row) in rows.enumerate() {
        let (idx, title, blob) = row?;
        if idx != expected as i64 {
            return Err(DomainError::ArtifactLoad(format!(
                "item indices are not contiguous: expected {expected}, found {idx}"
            )));
        }
        if blob.len() != row_bytes {
            return Err(DomainError::ArtifactLoad(format!(
                "vector for '{title}' has {} bytes, expected {row_bytes}",
                blob.len()
            )));
        }
        values.extend(deserialize_vector(&blob));
        titles.push(title);
    }

    if let Some(items) = meta.items {
        if items != titles.len() {
            return Err(DomainError::ArtifactLoad(format!(
                "meta records {items} items but table has {}",
                titles.len()
            )));
        }
    }

    EmbeddingStore::new(titles, meta.dimension, values)
}

/// Writes `store` to a SQLite artifact at `path`, replacing any previous
/// contents. Returns the number of items written.
pub fn write(store: &EmbeddingStore, path: &Path) -> Result<usize, DomainError> {
    let mut conn = Connection::open(path)
        .map_err(|e| DomainError::Io(format!("cannot create {}: {e}", path.display())))?;
    run_migrations(&conn).map_err(DomainError::Io)?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM items", [])?;
    tx.execute("DELETE FROM meta", [])?;
    {
        let mut insert = tx.prepare("INSERT INTO items (idx, title, vector) VALUES (?1, ?2, ?3)")?;
        for (i, row, _) in store.rows() {
            insert.execute(params![i as i64, store.titles()[i], serialize_vector(row)])?;
        }
        let mut meta = tx.prepare("INSERT INTO meta (key, value) VALUES (?1, ?2)")?;
        meta.execute(params!["dimension", store.dimension().to_string()])?;
        meta.execute(params!["items", store.size().to_string()])?;
        meta.execute(params!["created_at", Utc::now().to_rfc3339()])?;
    }
    tx.commit()?;

    tracing::info!(path = %path.display(), items = store.size(), "wrote SQLite artifact");
    Ok(store.size())
}
