use std::sync::Arc;
use std::time::Duration;

use storefront_core::{Category, CategoryFilter, CheckoutField, CheckoutScreen};

use super::command::CommandError;
use super::*;

fn session() -> Session {
    let catalog = Arc::new(Catalog::builtin().expect("builtin catalog"));
    Session::new(catalog, SessionSettings::default())
}

fn run(session: &mut Session, line: &str) -> Option<String> {
    let command = ShopCommand::parse(line)
        .expect("valid command")
        .expect("non-blank command");
    dispatch(session, command)
}

#[test]
fn parses_navigation_commands() {
    assert_eq!(ShopCommand::parse("home").unwrap(), Some(ShopCommand::Home));
    assert_eq!(ShopCommand::parse("  CART ").unwrap(), Some(ShopCommand::Cart));
    assert_eq!(
        ShopCommand::parse("view 7").unwrap(),
        Some(ShopCommand::View("7".to_string()))
    );
    assert_eq!(ShopCommand::parse("").unwrap(), None);
}

#[test]
fn parses_search_with_spaces_and_empty_search() {
    assert_eq!(
        ShopCommand::parse("search leather  bag").unwrap(),
        Some(ShopCommand::Search("leather  bag".to_string()))
    );
    assert_eq!(
        ShopCommand::parse("search").unwrap(),
        Some(ShopCommand::Search(String::new()))
    );
}

#[test]
fn parses_category_filter() {
    assert_eq!(
        ShopCommand::parse("category clothing").unwrap(),
        Some(ShopCommand::Category(CategoryFilter::Only(Category::Clothing)))
    );
    assert_eq!(
        ShopCommand::parse("category all").unwrap(),
        Some(ShopCommand::Category(CategoryFilter::All))
    );
    assert!(matches!(
        ShopCommand::parse("category toys"),
        Err(CommandError::InvalidArgument { command: "category", .. })
    ));
}

#[test]
fn parses_add_with_and_without_id() {
    assert_eq!(
        ShopCommand::parse("add 3").unwrap(),
        Some(ShopCommand::Add(Some("3".to_string())))
    );
    assert_eq!(ShopCommand::parse("add").unwrap(), Some(ShopCommand::Add(None)));
}

#[test]
fn parses_panel_actions() {
    assert_eq!(
        ShopCommand::parse("panel").unwrap(),
        Some(ShopCommand::Panel(PanelAction::Toggle))
    );
    assert_eq!(
        ShopCommand::parse("panel open").unwrap(),
        Some(ShopCommand::Panel(PanelAction::Open))
    );
    assert!(ShopCommand::parse("panel sideways").is_err());
}

#[test]
fn parses_quantity_command() {
    assert_eq!(
        ShopCommand::parse("qty 2 -1").unwrap(),
        Some(ShopCommand::SetQuantity {
            id: "2".to_string(),
            quantity: -1
        })
    );
    assert!(matches!(
        ShopCommand::parse("qty 2"),
        Err(CommandError::MissingArgument { command: "qty", .. })
    ));
    assert!(matches!(
        ShopCommand::parse("qty 2 lots"),
        Err(CommandError::InvalidArgument { command: "qty", .. })
    ));
}

#[test]
fn parses_set_field_keeping_value_spaces() {
    assert_eq!(
        ShopCommand::parse("set address 12 Main Street").unwrap(),
        Some(ShopCommand::Set {
            field: CheckoutField::Address,
            value: "12 Main Street".to_string()
        })
    );
    assert_eq!(
        ShopCommand::parse("set zip").unwrap(),
        Some(ShopCommand::Set {
            field: CheckoutField::ZipCode,
            value: String::new()
        })
    );
    assert!(matches!(
        ShopCommand::parse("set phone 555"),
        Err(CommandError::InvalidArgument { command: "set", .. })
    ));
}

#[test]
fn parses_wait_in_milliseconds() {
    assert_eq!(
        ShopCommand::parse("wait 1500").unwrap(),
        Some(ShopCommand::Wait(Duration::from_millis(1500)))
    );
    assert!(matches!(
        ShopCommand::parse("wait"),
        Err(CommandError::MissingArgument { command: "wait", .. })
    ));
    assert!(ShopCommand::parse("wait soon").is_err());
}

#[test]
fn unknown_and_missing_argument_errors() {
    assert_eq!(
        ShopCommand::parse("dance").unwrap_err(),
        CommandError::UnknownCommand("dance".to_string())
    );
    let err = ShopCommand::parse("view").unwrap_err();
    assert_eq!(err.to_string(), "'view' needs a product id");
}

#[test]
fn search_from_another_page_returns_to_catalog() {
    let mut s = session();
    s.go_cart();
    assert_eq!(run(&mut s, "search tee"), None);
    assert!(matches!(s.page(), Page::Catalog(_)));
    assert_eq!(s.catalog_cards().len(), 1);
}

#[test]
fn add_dispatches_by_page() {
    let mut s = session();
    assert_eq!(run(&mut s, "add 1"), None);
    assert!(run(&mut s, "add 1").is_some(), "busy while feedback shows");
    assert!(run(&mut s, "add").is_some());
    assert!(run(&mut s, "add 42").is_some());

    run(&mut s, "view 4");
    run(&mut s, "more");
    assert_eq!(run(&mut s, "add"), None);
    assert_eq!(s.cart().state().quantity_of("4"), 2);

    run(&mut s, "cart");
    assert!(run(&mut s, "add 1").is_some());
    assert!(run(&mut s, "more").is_some());
}

#[test]
fn cart_commands_require_line_in_cart() {
    let mut s = session();
    run(&mut s, "add 6");
    run(&mut s, "cart");
    assert!(run(&mut s, "inc 9").is_some());
    assert_eq!(run(&mut s, "inc 6"), None);
    assert_eq!(s.cart().total_item_count(), 2);
    assert_eq!(run(&mut s, "qty 6 0"), None);
    assert!(s.cart().lines().is_empty());
    assert!(run(&mut s, "remove 6").is_some());
}

#[test]
fn checkout_flow_through_commands() {
    let mut s = session();
    run(&mut s, "add 5");
    run(&mut s, "checkout");
    assert!(run(&mut s, "submit")
        .unwrap()
        .starts_with("6 field(s) need attention"));

    for line in [
        "set first Ada",
        "set last Lovelace",
        "set email ada@example.com",
        "set address 10 Analytical Row",
        "set city London",
        "set zip 12345",
    ] {
        assert_eq!(run(&mut s, line), None, "{line}");
    }
    assert_eq!(run(&mut s, "submit").as_deref(), Some("Processing..."));
    assert!(run(&mut s, "submit").is_some());

    let timer = s
        .checkout_page()
        .and_then(|page| page.pending_timer())
        .expect("submission pending");
    assert!(s.timer_fired(timer));
    assert_eq!(
        s.checkout_page().unwrap().screen(s.cart().state().is_empty()),
        CheckoutScreen::Confirmed
    );
    assert!(run(&mut s, "set city Paris").is_some());
}

#[test]
fn submit_off_checkout_is_ignored() {
    let mut s = session();
    assert!(run(&mut s, "submit").is_some());
}
