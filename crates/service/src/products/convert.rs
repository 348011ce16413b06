//! CSV → YAML conversion of the product catalog.
//!
//! Normalizes one CSV row per product and derives the category list from the
//! categories in first-seen order.

use std::{
    collections::HashSet,
    io::{Read, Write},
};

use models::product::{Category, Product};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ConvertError;

/// Columns mapped onto `Product` fields. Any other column is carried through as text.
pub const PRODUCT_COLUMNS: [&str; 13] = [
    "id", "url", "sk", "name", "category", "style", "description", "price", "image", "featured",
    "brewery", "abv", "ibu",
];

/// Raw CSV row, every column as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRow {
    pub id: String,
    pub url: String,
    pub sk: String,
    pub name: String,
    pub category: String,
    pub style: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub featured: String,
    pub brewery: String,
    pub abv: String,
    pub ibu: String,
    /// Unknown columns in header order.
    #[serde(skip)]
    pub extra: Vec<(String, String)>,
}

impl ProductRow {
    fn from_record(headers: &csv::StringRecord, record: &csv::StringRecord) -> Result<Self, ConvertError> {
        let mut row: ProductRow = record.deserialize(Some(headers))?;
        row.extra = headers
            .iter()
            .zip(record.iter())
            .filter(|(column, _)| !PRODUCT_COLUMNS.contains(column))
            .map(|(column, value)| (column.to_owned(), value.to_owned()))
            .collect();
        Ok(row)
    }
}

/// Products and categories produced from one CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedCatalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl ConvertedCatalog {
    pub fn write_products<W: Write>(&self, out: W) -> Result<(), ConvertError> {
        serde_yaml::to_writer(out, &self.products)?;
        Ok(())
    }

    pub fn write_categories<W: Write>(&self, out: W) -> Result<(), ConvertError> {
        serde_yaml::to_writer(out, &self.categories)?;
        Ok(())
    }
}

/// `"Pale Ale"` → `"pale-ale"`.
pub fn normalize_category(raw: &str) -> String {
    raw.replace(' ', "-").to_lowercase()
}

/// Turn one CSV row into a product. `row` is the 1-based data row number reported in errors.
pub fn format_product(raw: ProductRow, row: u64) -> Result<Product, ConvertError> {
    let abv = raw.abv.trim().parse::<f32>().map_err(|_| invalid(row, "abv", &raw.abv))?;
    let price = match raw.price.trim() {
        "" => 0.0,
        text => text.parse::<f32>().map_err(|_| invalid(row, "price", text))?,
    };
    let ibu = match raw.ibu.trim() {
        "N/A" => None,
        text => Some(text.parse::<i32>().map_err(|_| invalid(row, "ibu", text))?),
    };
    let featured = Some(raw.featured).filter(|f| !f.is_empty());
    let image = format!("{}.jpg", raw.id);
    let extra: Map<String, Value> = raw.extra.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
    Ok(Product {
        category: normalize_category(&raw.category),
        id: raw.id,
        url: raw.url,
        sk: raw.sk,
        name: raw.name,
        style: raw.style,
        description: raw.description,
        price,
        image,
        featured,
        brewery: raw.brewery,
        abv,
        ibu,
        extra,
    })
}

fn invalid(row: u64, column: &'static str, value: &str) -> ConvertError {
    ConvertError::InvalidField { row, column, value: value.to_string() }
}

/// One category per distinct product category, numbered from 1 in first-seen order.
pub fn derive_categories(products: &[Product]) -> Vec<Category> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::new();
    for product in products {
        if seen.insert(product.category.as_str()) {
            categories.push(Category {
                id: categories.len() as u32 + 1,
                name: product.category.clone(),
                image: product.image.clone(),
            });
        }
    }
    categories
}

/// Read a product CSV with a header row.
pub fn convert_csv<R: Read>(reader: R) -> Result<ConvertedCatalog, ConvertError> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?.clone();
    let mut products = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let row = ProductRow::from_record(&headers, &record?)?;
        products.push(format_product(row, i as u64 + 1)?);
    }
    let categories = derive_categories(&products);
    debug!(products = products.len(), categories = categories.len(), "converted product csv");
    Ok(ConvertedCatalog { products, categories })
}
