//! One-shot catalog commands.

use storefront_core::{Catalog, CatalogQuery, CategoryFilter};

use crate::render;

pub(crate) fn list(catalog: &Catalog, category: Option<CategoryFilter>, search: Option<&str>) {
    let query = CatalogQuery {
        search: search.unwrap_or_default().to_string(),
        category: category.unwrap_or_default(),
    };
    let products = catalog.query(&query);
    tracing::debug!(
        category = %query.category,
        search = %query.search,
        matched = products.len(),
        "listing products"
    );
    println!("{}", render::product_list(&products));
}

/// Unknown ids print the not-found view rather than failing.
pub(crate) fn show(catalog: &Catalog, id: &str, related_limit: usize) {
    let Some(product) = catalog.get(id) else {
        tracing::debug!(id, "product not found");
        println!("{}", render::product_not_found(id));
        return;
    };
    let related = catalog.related(product, related_limit);
    println!("{}", render::product_detail(product, &related));
}
