#![cfg(test)]
use std::path::{Path, PathBuf};

use models::location::{Catalog, Location};
use serde_json::json;

/// Uniquely named file under the system temp dir, removed on drop.
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Reserve a path without creating the file.
    pub fn new(ext: &str) -> Self {
        let path = std::env::temp_dir().join(format!("locations_{}.{ext}", uuid::Uuid::new_v4()));
        Self { path }
    }

    pub fn with_contents(ext: &str, contents: &str) -> std::io::Result<Self> {
        let file = Self::new(ext);
        file.write(contents)?;
        Ok(file)
    }

    pub fn write(&self, contents: &str) -> std::io::Result<()> {
        std::fs::write(&self.path, contents)
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn location(value: serde_json::Value) -> Location {
    Location::try_from(value).expect("location mapping")
}

/// A lists x and y, B lists x, C lists nothing.
pub fn abc_catalog() -> Catalog {
    vec![
        location(json!({"name": "A", "Beers": ["x", "y"]})),
        location(json!({"name": "B", "Beers": ["x"]})),
        location(json!({"name": "C", "Beers": []})),
    ]
}

pub fn names<'a>(locations: impl IntoIterator<Item = &'a Location>) -> Vec<&'a str> {
    locations
        .into_iter()
        .map(|l| l.get("name").and_then(|v| v.as_str()).unwrap_or_default())
        .collect()
}
