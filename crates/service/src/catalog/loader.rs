use std::{fmt, io::Read, path::Path};

use models::errors::ModelError;
use models::location::{value_kind, Catalog};
use serde_json::Value;
use tracing::debug;

use crate::errors::LoadError;

/// Encoding of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.json` is JSON; everything else goes through the YAML parser, which also accepts JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Read a catalog file, choosing the format from its extension.
pub fn load_path(path: &Path) -> Result<Catalog, LoadError> {
    read_records(path)
}

/// Read any sequence-of-mappings file into records of type `T`.
pub(crate) fn read_records<T>(path: &Path) -> Result<Vec<T>, LoadError>
where
    T: TryFrom<Value, Error = ModelError>,
{
    let bytes = std::fs::read(path).map_err(|e| LoadError::io(path.display().to_string(), e))?;
    let format = CatalogFormat::from_path(path);
    debug!(path = %path.display(), %format, bytes = bytes.len(), "read catalog source");
    parse_records(&bytes, format)
}

/// Read a catalog from any byte stream.
pub fn load<R: Read>(mut reader: R, format: CatalogFormat) -> Result<Catalog, LoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::io("catalog stream", e))?;
    load_slice(&bytes, format)
}

/// Parse an in-memory catalog document.
pub fn load_slice(bytes: &[u8], format: CatalogFormat) -> Result<Catalog, LoadError> {
    parse_records(bytes, format)
}

fn parse_records<T>(bytes: &[u8], format: CatalogFormat) -> Result<Vec<T>, LoadError>
where
    T: TryFrom<Value, Error = ModelError>,
{
    let document: Value = match format {
        CatalogFormat::Json => serde_json::from_slice(bytes)
            .map_err(|e| LoadError::Parse { format, message: e.to_string() })?,
        CatalogFormat::Yaml => serde_yaml::from_slice(bytes)
            .map_err(|e| LoadError::Parse { format, message: e.to_string() })?,
    };
    into_records(document)
}

fn into_records<T>(document: Value) -> Result<Vec<T>, LoadError>
where
    T: TryFrom<Value, Error = ModelError>,
{
    let records = match document {
        Value::Array(records) => records,
        other => return Err(LoadError::NotASequence { found: value_kind(&other) }),
    };
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            T::try_from(record).map_err(|e| LoadError::Shape { position, reason: e.to_string() })
        })
        .collect()
}
