#![forbid(unsafe_code)]

//! Boundary types for the catalog and filter providers.
//!
//! Fetching is the host's business. The editor only consumes what arrives
//! ([`CatalogPage`]) and describes what to fetch next ([`CatalogQuery`]).

use serde::{Deserialize, Serialize};

use crate::identity::Product;

/// One page of catalog products plus the collection's total product count.
///
/// `total_count` is the source of truth for the slot board's length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_count: usize,
}

impl CatalogPage {
    #[must_use]
    pub fn new(products: Vec<Product>, total_count: usize) -> Self {
        Self {
            products,
            total_count,
        }
    }
}

/// An active filter criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub value_name: String,
    #[serde(default)]
    pub filter_title: String,
    #[serde(default)]
    pub comparison_type: i32,
}

impl FilterSelection {
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            value_name: String::new(),
            filter_title: String::new(),
            comparison_type: 0,
        }
    }

    /// Whether this selection is the `(id, value)` pair.
    #[must_use]
    pub fn matches(&self, id: &str, value: &str) -> bool {
        self.id == id && self.value == value
    }
}

/// What the host should fetch next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub collection_id: String,
    /// 1-based page.
    pub page: usize,
    pub page_size: usize,
    #[serde(rename = "additionalFilters")]
    pub filters: Vec<FilterSelection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_page_from_json() {
        let json = r#"{
            "products": [{"productCode": "A", "colorCode": "1"}],
            "totalCount": 42
        }"#;
        let page: CatalogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total_count, 42);
    }

    #[test]
    fn filter_from_json_with_defaults() {
        let json = r#"{"id": "color", "value": "red"}"#;
        let filter: FilterSelection = serde_json::from_str(json).unwrap();
        assert!(filter.matches("color", "red"));
        assert!(!filter.matches("color", "blue"));
        assert_eq!(filter.comparison_type, 0);
    }

    #[test]
    fn query_serializes_in_provider_shape() {
        let query = CatalogQuery {
            collection_id: "12".into(),
            page: 2,
            page_size: 36,
            filters: vec![FilterSelection::new("size", "M")],
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["pageSize"], 36);
        assert_eq!(json["additionalFilters"][0]["id"], "size");
    }
}
