use storefront_core::{Category, CategoryFilter};

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storefront"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_shop_command() {
    let cli = Cli::try_parse_from(["storefront", "shop"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Shop)));
}

#[test]
fn parses_products_without_filters() {
    let cli = Cli::try_parse_from(["storefront", "products"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            category: None,
            search: None
        })
    ));
}

#[test]
fn parses_products_with_category_and_search() {
    let cli = Cli::try_parse_from([
        "storefront",
        "products",
        "--category",
        "Electronics",
        "--search",
        "smart",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            category: Some(CategoryFilter::Only(Category::Electronics)),
            search: Some(ref s)
        }) if s == "smart"
    ));
}

#[test]
fn products_rejects_unknown_category() {
    let result = Cli::try_parse_from(["storefront", "products", "--category", "toys"]);
    assert!(result.is_err());
}

#[test]
fn parses_product_with_id() {
    let cli = Cli::try_parse_from(["storefront", "product", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Product { ref id }) if id == "7"
    ));
}

#[test]
fn product_requires_id() {
    assert!(Cli::try_parse_from(["storefront", "product"]).is_err());
}

#[test]
fn builtin_catalog_is_used_without_path() {
    let config = AppConfig {
        env: storefront_core::Environment::Test,
        log_level: "info".to_string(),
        catalog_path: None,
        checkout_delay_ms: 1500,
        feedback_ms: 1000,
        tax_rate: rust_decimal::Decimal::new(8, 2),
        related_limit: 4,
    };
    let catalog = load_catalog(&config).expect("builtin catalog");
    assert_eq!(catalog.len(), 9);
}

#[test]
fn missing_catalog_file_is_reported_with_path() {
    let config = AppConfig {
        env: storefront_core::Environment::Test,
        log_level: "info".to_string(),
        catalog_path: Some("/nonexistent/catalog.yaml".into()),
        checkout_delay_ms: 1500,
        feedback_ms: 1000,
        tax_rate: rust_decimal::Decimal::new(8, 2),
        related_limit: 4,
    };
    let err = load_catalog(&config).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/catalog.yaml"));
}
