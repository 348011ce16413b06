use std::{collections::HashSet, path::Path};

use models::product::ProductRecord;

use crate::catalog::loader;
use crate::errors::LoadError;

/// Records whose `category` is one of `categories`, in input order.
///
/// Records without a string `category` never match.
pub fn filter_by_category<'a, S: AsRef<str>>(
    records: &'a [ProductRecord],
    categories: &[S],
) -> Vec<&'a ProductRecord> {
    let wanted: HashSet<&str> = categories.iter().map(|c| c.as_ref()).collect();
    records
        .iter()
        .filter(|r| r.category().is_some_and(|c| wanted.contains(c)))
        .collect()
}

/// Products file held as raw records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    records: Vec<ProductRecord>,
}

impl ProductCatalog {
    /// YAML by default; a `.json` file is read as JSON.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let records = loader::read_records(path)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ProductRecord] { &self.records }

    pub fn subcategory_sample<S: AsRef<str>>(&self, categories: &[S]) -> Vec<&ProductRecord> {
        filter_by_category(&self.records, categories)
    }
}

impl From<Vec<ProductRecord>> for ProductCatalog {
    fn from(records: Vec<ProductRecord>) -> Self { Self { records } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempFile;
    use serde_json::{json, Value};

    fn product(id: &str, category: &str) -> ProductRecord {
        ProductRecord::try_from(json!({"id": id, "name": format!("beer {id}"), "category": category}))
            .expect("mapping")
    }

    fn ids<'a>(records: impl IntoIterator<Item = &'a ProductRecord>) -> Vec<&'a str> {
        records.into_iter().filter_map(|r| r.get("id").and_then(Value::as_str)).collect()
    }

    #[test]
    fn keeps_matching_records_in_order() {
        let records = vec![
            product("1", "ipa"),
            product("2", "stout"),
            product("3", "lager"),
            product("4", "ipa"),
        ];
        let before = records.clone();
        assert_eq!(ids(filter_by_category(&records, &["ipa", "lager"])), vec!["1", "3", "4"]);
        assert_eq!(records, before);
    }

    #[test]
    fn no_categories_means_nothing() {
        let records = vec![product("1", "ipa")];
        let none: [&str; 0] = [];
        assert!(filter_by_category(&records, &none).is_empty());
        assert!(filter_by_category(&records, &["porter"]).is_empty());
    }

    #[test]
    fn duplicate_records_are_kept() {
        let records = vec![product("1", "ipa"), product("1", "ipa")];
        let wanted = vec!["ipa".to_string(), "ipa".to_string()];
        assert_eq!(ids(filter_by_category(&records, &wanted)), vec!["1", "1"]);
    }

    #[test]
    fn records_without_string_category_never_match() {
        let records = vec![
            ProductRecord::try_from(json!({"id": "1"})).unwrap(),
            ProductRecord::try_from(json!({"id": "2", "category": 5})).unwrap(),
            product("3", "5"),
        ];
        assert_eq!(ids(filter_by_category(&records, &["5"])), vec!["3"]);
    }

    #[test]
    fn catalog_loads_yaml_and_samples() -> anyhow::Result<()> {
        let file = TempFile::with_contents(
            "yaml",
            "- id: '1'\n  name: Furious\n  category: ipa\n- id: '2'\n  name: Darkness\n  category: stout\n",
        )?;
        let catalog = ProductCatalog::load(file.path())?;
        assert_eq!(catalog.records().len(), 2);
        assert_eq!(ids(catalog.subcategory_sample(&["stout"])), vec!["2"]);
        Ok(())
    }

    #[test]
    fn sample_returns_records_untouched() -> anyhow::Result<()> {
        let file = TempFile::with_contents(
            "yaml",
            "- id: '1'\n  category: ipa\n  current_stock: 7\n- sk: b\n  category: ipa\n",
        )?;
        let catalog = ProductCatalog::load(file.path())?;
        let sample = catalog.subcategory_sample(&["ipa"]);
        let out = serde_json::to_value(&sample)?;
        assert_eq!(
            out,
            json!([
                {"id": "1", "category": "ipa", "current_stock": 7},
                {"sk": "b", "category": "ipa"}
            ])
        );
        Ok(())
    }

    #[test]
    fn catalog_rejects_non_list_yaml() -> anyhow::Result<()> {
        let file = TempFile::with_contents("yaml", "id: '1'\n")?;
        assert!(matches!(ProductCatalog::load(file.path()), Err(LoadError::NotASequence { .. })));

        let file = TempFile::with_contents("yaml", "- id: '1'\n- plain\n")?;
        assert!(matches!(ProductCatalog::load(file.path()), Err(LoadError::Shape { position: 1, .. })));
        Ok(())
    }
}
