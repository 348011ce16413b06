use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::location::value_kind;

/// A product entry written by the CSV conversion.
///
/// Columns outside the known set are carried in `extra`, in column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sk: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f32,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
    #[serde(default)]
    pub brewery: String,
    #[serde(default)]
    pub abv: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibu: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A category entry of the categories catalog file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub image: String,
}

/// A products-file entry as read, every field kept in source order.
///
/// Only `category` is interpreted; sampling hands records back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Map<String, Value>);

impl ProductRecord {
    pub fn fields(&self) -> &Map<String, Value> { &self.0 }

    pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

    /// `None` when the field is absent or not a string.
    pub fn category(&self) -> Option<&str> { self.0.get("category").and_then(Value::as_str) }
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(fields: Map<String, Value>) -> Self { Self(fields) }
}

impl TryFrom<Value> for ProductRecord {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ModelError::Validation(format!(
                "product record must be a mapping, got {}",
                value_kind(&other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted_when_empty() {
        let p = Product {
            id: "1".into(),
            url: String::new(),
            sk: String::new(),
            name: "Furious".into(),
            category: "ipa".into(),
            style: "American IPA".into(),
            description: String::new(),
            price: 9.99,
            image: "1.jpg".into(),
            featured: None,
            brewery: "Surly".into(),
            abv: 6.7,
            ibu: None,
            extra: Map::new(),
        };
        let yaml = serde_yaml::to_string(&p).unwrap();
        assert!(!yaml.contains("ibu"));
        assert!(!yaml.contains("featured"));
    }

    #[test]
    fn parses_minimal_yaml_entry() {
        let p: Product = serde_yaml::from_str("id: '7'\nname: Todd\ncategory: pale-ale\nibu: 35\n").unwrap();
        assert_eq!(p.ibu, Some(35));
        assert_eq!(p.category, "pale-ale");
        assert_eq!(p.abv, 0.0);
        assert!(p.extra.is_empty());
    }

    #[test]
    fn unknown_columns_land_in_extra() {
        let p: Product =
            serde_yaml::from_str("id: '7'\nname: Todd\ncategory: pale-ale\ncurrent_stock: '7'\n").unwrap();
        assert_eq!(p.extra.get("current_stock"), Some(&json!("7")));
        assert!(serde_yaml::to_string(&p).unwrap().contains("current_stock"));
    }

    #[test]
    fn record_keeps_every_field() {
        let record = ProductRecord::try_from(json!({"sk": "b", "category": "ipa", "current_stock": 7})).unwrap();
        assert_eq!(record.category(), Some("ipa"));
        let keys: Vec<_> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["sk", "category", "current_stock"]);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"sk": "b", "category": "ipa", "current_stock": 7}));
    }

    #[test]
    fn record_category_must_be_a_string() {
        let record = ProductRecord::from(Map::new());
        assert_eq!(record.category(), None);
        let record = ProductRecord::try_from(json!({"category": 3})).unwrap();
        assert_eq!(record.category(), None);
        assert!(ProductRecord::try_from(json!(["ipa"])).is_err());
    }
}
