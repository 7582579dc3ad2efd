use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::products::{CategoryFilter, Product};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Default number of related products shown on a product detail page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The fixed, read-only set of purchasable products, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Search text plus category selection from the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl Catalog {
    /// The catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, CatalogError> {
        parse_catalog(BUILTIN_CATALOG)
    }

    /// Build a catalog from products already in memory, applying the same
    /// validation as file loading.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` on empty ids/names, duplicate ids, or
    /// non-positive prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate_products(&products)?;
        Ok(Self { products })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching both the search text and the category filter, in
    /// catalog order.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let needle = query.search.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_search(&needle) && query.category.matches(p.category))
            .collect()
    }

    /// Other products in the same category as `product`, at most `limit`.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = parse_catalog(&content)?;
    tracing::debug!(
        path = %path.display(),
        products = catalog.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

/// Parse and validate catalog YAML of the form `products: [...]`.
///
/// # Errors
///
/// Returns `CatalogError` if the YAML is malformed or fails validation.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    Catalog::from_products(file.products)
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();

    for product in products {
        if product.id.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "product '{}' has an empty id",
                product.name
            )));
        }

        if product.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "product '{}' has an empty name",
                product.id
            )));
        }

        if product.price <= Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "product '{}' has non-positive price {}",
                product.id, product.price
            )));
        }

        if !seen_ids.insert(product.id.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate product id: '{}'",
                product.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
