use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// A single location record.
///
/// Fields are kept as parsed, in source order, and served back verbatim.
/// Only the configured tag field is ever interpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(Map<String, Value>);

/// Every location record in source order.
pub type Catalog = Vec<Location>;

impl Location {
    pub fn fields(&self) -> &Map<String, Value> { &self.0 }

    pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

    /// Identifiers listed under `tag_field`, in order, duplicates kept.
    ///
    /// A missing field yields no tags. A field that is present but is not an
    /// array of strings is a validation error.
    pub fn tags<'a>(&'a self, tag_field: &str) -> Result<Vec<&'a str>, ModelError> {
        let Some(value) = self.0.get(tag_field) else {
            return Ok(Vec::new());
        };
        let items = value.as_array().ok_or_else(|| {
            ModelError::Validation(format!(
                "field `{tag_field}` must be an array of strings, got {}",
                value_kind(value)
            ))
        })?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().ok_or_else(|| {
                    ModelError::Validation(format!(
                        "field `{tag_field}`[{i}] must be a string, got {}",
                        value_kind(item)
                    ))
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Location {
    fn from(fields: Map<String, Value>) -> Self { Self(fields) }
}

impl TryFrom<Value> for Location {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ModelError::Validation(format!(
                "location record must be a mapping, got {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Short JSON type name used in error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
