use std::path::Path;

use super::*;
use crate::products::Category;

fn product(id: &str, price: &str, category: Category) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        price: price.parse().expect("valid decimal"),
        category,
        image: String::new(),
        description: format!("Description for {id}"),
    }
}

#[test]
fn builtin_catalog_has_nine_products() {
    let catalog = Catalog::builtin().expect("builtin catalog should parse");
    assert_eq!(catalog.len(), 9);
    let earbuds = catalog.get("1").expect("product 1 exists");
    assert_eq!(earbuds.name, "Wireless Earbuds Pro");
    assert_eq!(earbuds.price, Decimal::new(7999, 2));
    assert_eq!(earbuds.category, Category::Electronics);
}

#[test]
fn get_unknown_id_returns_none() {
    let catalog = Catalog::builtin().unwrap();
    assert!(catalog.get("999").is_none());
}

#[test]
fn query_default_returns_everything_in_order() {
    let catalog = Catalog::builtin().unwrap();
    let ids: Vec<&str> = catalog
        .query(&CatalogQuery::default())
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
}

#[test]
fn query_filters_by_category() {
    let catalog = Catalog::builtin().unwrap();
    let query = CatalogQuery {
        search: String::new(),
        category: CategoryFilter::Only(Category::Clothing),
    };
    let ids: Vec<&str> = catalog
        .query(&query)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "6", "9"]);
}

#[test]
fn query_search_is_case_insensitive_over_name_and_description() {
    let catalog = Catalog::builtin().unwrap();
    let query = CatalogQuery {
        search: "LEATHER".to_string(),
        category: CategoryFilter::All,
    };
    let ids: Vec<&str> = catalog
        .query(&query)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    // Watch matches on name and description, tote on description only.
    assert_eq!(ids, vec!["2", "5"]);
}

#[test]
fn query_combines_search_and_category() {
    let catalog = Catalog::builtin().unwrap();
    let query = CatalogQuery {
        search: "leather".to_string(),
        category: CategoryFilter::Only(Category::Clothing),
    };
    assert!(catalog.query(&query).is_empty());
}

#[test]
fn related_excludes_self_and_respects_limit() {
    let catalog = Catalog::builtin().unwrap();
    let watch = catalog.get("2").unwrap();
    let ids: Vec<&str> = catalog
        .related(watch, DEFAULT_RELATED_LIMIT)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["5", "8"]);

    let limited = catalog.related(watch, 1);
    assert_eq!(limited.len(), 1);
}

#[test]
fn from_products_rejects_duplicate_ids() {
    let err = Catalog::from_products(vec![
        product("a", "1.00", Category::Clothing),
        product("a", "2.00", Category::Clothing),
    ])
    .unwrap_err();
    assert!(
        matches!(err, CatalogError::Validation(ref msg) if msg.contains("duplicate")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn from_products_rejects_zero_price() {
    let err = Catalog::from_products(vec![product("a", "0", Category::Clothing)]).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn from_products_rejects_empty_id() {
    let err = Catalog::from_products(vec![product(" ", "1.00", Category::Clothing)]).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref msg) if msg.contains("empty id")));
}

#[test]
fn parse_catalog_rejects_unknown_category() {
    let yaml = r#"
products:
  - id: "x"
    name: Boots
    price: "10.00"
    category: shoes
    image: ""
    description: Sturdy.
"#;
    assert!(matches!(parse_catalog(yaml), Err(CatalogError::Parse(_))));
}

#[test]
fn parse_catalog_accepts_minimal_file() {
    let yaml = r#"
products:
  - id: "x"
    name: Boots
    price: "10.50"
    category: clothing
    image: https://example.com/boots.jpg
    description: Sturdy.
"#;
    let catalog = parse_catalog(yaml).expect("valid catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("x").unwrap().price, Decimal::new(1050, 2));
}

#[test]
fn load_catalog_missing_file_is_io_error() {
    let err = load_catalog(Path::new("/definitely/not/here/catalog.yaml")).unwrap_err();
    assert!(
        matches!(err, CatalogError::FileIo { ref path, .. } if path.contains("catalog.yaml")),
        "unexpected error: {err:?}"
    );
}
