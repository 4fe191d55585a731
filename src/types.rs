//! The manifest: the only data shared between the builder and the viewer.
//!
//! The builder serializes a [`Manifest`] to `manifest.json`; the viewer reads
//! it back with [`parse_manifest`], which also accepts the older bare-array
//! form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Manifest is null")]
    Null,
    #[error("Field `images` must be an array, found {0}")]
    ImagesNotArray(&'static str),
    #[error("Image entry {index} must be a string, found {found}")]
    EntryNotString { index: usize, found: &'static str },
    #[error("Field `basePath` must be a string, found {0}")]
    BasePathNotString(&'static str),
}

/// Gallery descriptor written by the builder and consumed by the viewer.
///
/// Field order is the serialization order: `basePath` always precedes
/// `images`, which keeps rebuilt manifests byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// URL prefix ending in `/`, prepended to each filename.
    #[serde(rename = "basePath")]
    pub base_path: String,
    /// Filenames in gallery order. Not deduplicated.
    pub images: Vec<String>,
}

impl Manifest {
    /// Serialize as two-space pretty JSON without a trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn image_list(entries: &[Value]) -> Result<Vec<String>, ManifestError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::String(s) => Ok(s.clone()),
            other => Err(ManifestError::EntryNotString {
                index,
                found: kind(other),
            }),
        })
        .collect()
}

/// Parse a manifest body, accepting both supported shapes.
///
/// - `["a.jpg", "b.jpg"]` → those images with `default_base_path`
/// - `{"basePath": "...", "images": [...]}` → as written; a missing or null
///   `images` is empty, a missing, null or empty `basePath` falls back to
///   `default_base_path`
/// - any other non-null scalar carries no images → empty manifest
///
/// A bare array never carries a base path, so a custom prefix can only be
/// expressed with the object form.
pub fn parse_manifest(body: &str, default_base_path: &str) -> Result<Manifest, ManifestError> {
    let value: Value = serde_json::from_str(body)?;

    let (images, base_path) = match &value {
        Value::Null => return Err(ManifestError::Null),
        Value::Array(entries) => (image_list(entries)?, None),
        Value::Object(fields) => {
            let images = match fields.get("images") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(entries)) => image_list(entries)?,
                Some(other) => return Err(ManifestError::ImagesNotArray(kind(other))),
            };
            let base_path = match fields.get("basePath") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => return Err(ManifestError::BasePathNotString(kind(other))),
            };
            (images, base_path)
        }
        _ => (Vec::new(), None),
    };

    Ok(Manifest {
        base_path: base_path.unwrap_or_else(|| default_base_path.to_string()),
        images,
    })
}
