use thiserror::Error;

use crate::catalog::loader::CatalogFormat;

/// Failure to produce a servable catalog. Fatal at startup, reported on reload.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {format} catalog: {message}")]
    Parse { format: CatalogFormat, message: String },
    #[error("expected a sequence of records, got {found}")]
    NotASequence { found: &'static str },
    #[error("record {position}: {reason}")]
    Shape { position: usize, reason: String },
}

impl LoadError {
    pub fn io(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { origin: origin.into(), source }
    }
}

/// Per-request lookup failure. Never affects index state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup key is required")]
    MissingKey,
    #[error("{0} not found")]
    NotFound(String),
}

/// Failure while converting the product CSV into catalog files.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidField { row: u64, column: &'static str, value: String },
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
