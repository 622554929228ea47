//! Resolves textual schema references to schema handles.
//!
//! A reference has the form `PATH:Name`, e.g. `schemas.yaml:User` or
//! `config/models.json:Order`. The path part is split on the last `:` so
//! paths containing drive letters still parse. Every failure here is a
//! configuration error surfaced before any generation begins.

use crate::error::{Result, TycheError};
use crate::schema::{SchemaDocument, SchemaHandle};
use std::fs;
use std::sync::Arc;

/// Splits a `PATH:Name` reference into its parts.
pub fn parse_reference(reference: &str) -> Result<(&str, &str)> {
    match reference.rsplit_once(':') {
        Some((path, name)) if !path.is_empty() && !name.is_empty() => Ok((path, name)),
        _ => Err(TycheError::InvalidReference(reference.to_string())),
    }
}

/// Reads and parses a schema document from disk.
///
/// YAML and JSON are both accepted (JSON is a subset of YAML 1.2).
pub fn load_document(path: &str) -> Result<Arc<SchemaDocument>> {
    let raw = fs::read_to_string(path).map_err(|source| TycheError::DocumentNotFound {
        path: path.to_string(),
        source,
    })?;

    let document: SchemaDocument =
        serde_yaml::from_str(&raw).map_err(|e| TycheError::InvalidDocument {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    Ok(Arc::new(document))
}

/// Resolves a `PATH:Name` reference to a handle on the named schema.
pub fn resolve(reference: &str) -> Result<SchemaHandle> {
    let (path, name) = parse_reference(reference)?;
    let document = load_document(path)?;
    SchemaHandle::new(document, name).ok_or_else(|| TycheError::SchemaNotFound {
        name: name.to_string(),
        path: path.to_string(),
    })
}
