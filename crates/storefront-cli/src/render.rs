//! Plain-text rendering of storefront views.

use storefront_core::{
    format_price, CartState, CategoryFilter, CheckoutField, CheckoutPage, CheckoutScreen,
    DetailView, OrderSummary, Page, Product, Session,
};

const RULE: &str = "------------------------------------------------------------";

/// Header, current page, and the cart panel when it is open.
pub(crate) fn screen(session: &Session) -> String {
    let mut lines = vec![header(session), RULE.to_string()];
    lines.push(page(session));
    if session.cart().is_panel_open() {
        lines.push(RULE.to_string());
        lines.push(panel(session.cart().state(), session.order_summary()));
    }
    lines.join("\n")
}

fn header(session: &Session) -> String {
    match session.header_badge() {
        Some(count) => format!("Storefront    Products  Cart    [cart: {count}]"),
        None => "Storefront    Products  Cart    [cart]".to_string(),
    }
}

fn page(session: &Session) -> String {
    match session.page() {
        Page::Catalog(catalog) => {
            let mut lines = vec![
                "Discover Quality Products".to_string(),
                filter_bar(&catalog.query.search, catalog.query.category),
                String::new(),
            ];
            let cards = session.catalog_cards();
            if cards.is_empty() {
                lines.push("No products found".to_string());
                lines.push("Try adjusting your search or filter criteria.".to_string());
            }
            for card in cards {
                lines.push(format!(
                    "  #{:<3} {:<28} {:>9}  [{}]",
                    card.product.id,
                    card.product.name,
                    format_price(card.product.price),
                    card.button.label()
                ));
                lines.push(format!(
                    "        {}  {}",
                    card.product.category.to_string().to_uppercase(),
                    card.product.description
                ));
            }
            lines.join("\n")
        }
        Page::ProductDetail(_) => session
            .detail_view()
            .map(|view| detail(&view))
            .unwrap_or_default(),
        Page::Cart => cart_page(session.cart().state(), session.order_summary()),
        Page::Checkout(checkout) => {
            checkout_page(checkout, session.cart().state(), session.order_summary())
        }
    }
}

fn filter_bar(search: &str, selected: CategoryFilter) -> String {
    let categories: Vec<String> = CategoryFilter::options()
        .into_iter()
        .map(|option| {
            if option == selected {
                format!("[{}]", option.label())
            } else {
                option.label().to_string()
            }
        })
        .collect();
    let search = if search.is_empty() {
        "Search products...".to_string()
    } else {
        format!("\"{search}\"")
    };
    format!("Search: {search}    {}", categories.join("  "))
}

fn detail(view: &DetailView<'_>) -> String {
    let label = view.button_label().unwrap_or_default();
    match view {
        DetailView::NotFound { requested_id } => product_not_found(requested_id),
        DetailView::Found {
            product,
            quantity,
            in_cart,
            related,
            ..
        } => {
            let mut lines = vec![
                "< Back to Products".to_string(),
                String::new(),
                format!("{}  ({})", product.name, product.category),
                format_price(product.price),
                product.description.clone(),
                format!("Image: {}", product.detail_image()),
                String::new(),
                format!("Quantity: [-] {quantity} [+]    [{label}]"),
            ];
            if *in_cart > 0 {
                lines.push(format!("You have {in_cart} in your cart"));
            }
            lines.push(
                "Free Shipping · Easy Returns · Secure Checkout · Quality Guaranteed".to_string(),
            );
            if !related.is_empty() {
                lines.push(String::new());
                lines.push("You May Also Like".to_string());
                for card in related {
                    let marker = if card.in_cart { "  (In cart)" } else { "" };
                    lines.push(format!(
                        "  #{:<3} {:<28} {:>9}{marker}",
                        card.product.id,
                        card.product.name,
                        format_price(card.product.price)
                    ));
                }
            }
            lines.join("\n")
        }
    }
}

fn cart_lines(state: &CartState) -> Vec<String> {
    state
        .lines()
        .iter()
        .map(|line| {
            format!(
                "  #{:<3} {:<28} [-] {} [+]  {:>9}  ({} each)",
                line.id,
                line.name,
                line.quantity,
                format_price(line.line_total()),
                format_price(line.price)
            )
        })
        .collect()
}

fn summary_lines(state: &CartState, summary: OrderSummary) -> Vec<String> {
    vec![
        format!(
            "  Subtotal ({} items)  {}",
            state.total_item_count(),
            format_price(summary.subtotal)
        ),
        format!(
            "  Shipping            {}",
            if summary.is_free_shipping() {
                "Free".to_string()
            } else {
                format_price(summary.shipping)
            }
        ),
        format!("  Tax                 {}", format_price(summary.tax)),
        format!("  Total               {}", format_price(summary.total)),
    ]
}

fn cart_page(state: &CartState, summary: OrderSummary) -> String {
    let mut lines = vec!["< Continue Shopping".to_string(), "Shopping Cart".to_string()];
    if state.is_empty() {
        lines.push("Your cart is empty".to_string());
        lines.push(
            "Looks like you haven't added anything to your cart yet. Start exploring our collection!"
                .to_string(),
        );
        return lines.join("\n");
    }
    lines.extend(cart_lines(state));
    lines.push("  Clear Cart".to_string());
    lines.push(String::new());
    lines.push("Order Summary".to_string());
    lines.extend(summary_lines(state, summary));
    lines.push("  [Proceed to Checkout]".to_string());
    lines.join("\n")
}

fn panel(state: &CartState, summary: OrderSummary) -> String {
    let mut lines = vec![format!("Your Cart ({})", state.total_item_count())];
    if state.is_empty() {
        lines.push("Your cart is empty".to_string());
        lines.push("Start shopping to add items to your cart.".to_string());
        return lines.join("\n");
    }
    lines.extend(cart_lines(state));
    lines.push(format!("  Subtotal  {}", format_price(summary.subtotal)));
    lines.push("  [View Cart]  [Checkout]".to_string());
    lines.join("\n")
}

fn checkout_page(page: &CheckoutPage, state: &CartState, summary: OrderSummary) -> String {
    match page.screen(state.is_empty()) {
        CheckoutScreen::EmptyCart => [
            "No items to checkout",
            "Add some products to your cart before proceeding to checkout.",
            "[Browse Products]",
        ]
        .join("\n"),
        CheckoutScreen::Confirmed => {
            let Some(confirmation) = page.confirmation() else {
                return String::new();
            };
            [
                "Order Confirmed!".to_string(),
                format!("Thank you for your purchase, {}!", confirmation.first_name),
                format!(
                    "A confirmation email has been sent to {}.",
                    confirmation.email
                ),
                format!(
                    "Order #{}  ·  {} items  ·  {}",
                    confirmation.order_number(),
                    confirmation.item_count,
                    format_price(confirmation.summary.total)
                ),
                "[Continue Shopping]".to_string(),
            ]
            .join("\n")
        }
        CheckoutScreen::Form => {
            let mut lines = vec!["< Back to Cart".to_string(), "Checkout".to_string()];
            for field in CheckoutField::ALL {
                lines.push(format!(
                    "  {:<15} ({:<10}) {}",
                    field.label(),
                    field.key(),
                    page.form().value(field)
                ));
                if let Some(error) = page.form().error(field) {
                    lines.push(format!("      ! {error}"));
                }
            }
            lines.push(String::new());
            lines.push("Order Summary".to_string());
            for line in state.lines() {
                lines.push(format!(
                    "  {:<28} Qty: {:<3} {:>9}",
                    line.name,
                    line.quantity,
                    format_price(line.line_total())
                ));
            }
            lines.extend(summary_lines(state, summary));
            if page.is_submitting() {
                lines.push("  [Processing...]".to_string());
            } else {
                lines.push(format!("  [Place Order • {}]", format_price(summary.total)));
            }
            lines.join("\n")
        }
    }
}

/// Listing used by the one-shot `products` command.
pub(crate) fn product_list(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products found\nTry adjusting your search or filter criteria.".to_string();
    }
    products
        .iter()
        .map(|p| {
            format!(
                "#{:<3} {:<28} {:<12} {:>9}",
                p.id,
                p.name,
                p.category,
                format_price(p.price)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn product_not_found(requested_id: &str) -> String {
    [
        "Product Not Found".to_string(),
        format!("The product you're looking for doesn't exist. (id: {requested_id})"),
        "< Back to Shop".to_string(),
    ]
    .join("\n")
}

/// Detail used by the one-shot `product` command.
pub(crate) fn product_detail(product: &Product, related: &[&Product]) -> String {
    let mut lines = vec![
        format!("{}  ({})", product.name, product.category),
        format_price(product.price),
        product.description.clone(),
        format!("Image: {}", product.detail_image()),
    ];
    if !related.is_empty() {
        lines.push(String::new());
        lines.push("You May Also Like".to_string());
        lines.extend(related.iter().map(|p| {
            format!("  #{:<3} {:<28} {:>9}", p.id, p.name, format_price(p.price))
        }));
    }
    lines.join("\n")
}
