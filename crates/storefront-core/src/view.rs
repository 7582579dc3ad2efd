//! Read-only view models produced by [`crate::Session`] for rendering.

use crate::products::Product;

/// State of a product card's add button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddButton {
    AddToCart,
    AddMore,
    /// Transient confirmation; the button is disabled while shown.
    Added,
}

impl AddButton {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AddButton::AddToCart => "Add to Cart",
            AddButton::AddMore => "Add More",
            AddButton::Added => "Added!",
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, AddButton::Added)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard<'a> {
    pub product: &'a Product,
    pub button: AddButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedCard<'a> {
    pub product: &'a Product,
    pub in_cart: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView<'a> {
    NotFound {
        requested_id: &'a str,
    },
    Found {
        product: &'a Product,
        /// Quantity selected with the stepper, at least 1.
        quantity: u32,
        /// `true` while the "Added to Cart!" confirmation is showing.
        adding: bool,
        /// How many of this product are already in the cart.
        in_cart: u32,
        related: Vec<RelatedCard<'a>>,
    },
}

impl DetailView<'_> {
    /// Label for the detail page's add button.
    #[must_use]
    pub fn button_label(&self) -> Option<String> {
        match self {
            DetailView::NotFound { .. } => None,
            DetailView::Found { adding: true, .. } => Some("Added to Cart!".to_string()),
            DetailView::Found { quantity, .. } if *quantity > 1 => {
                Some(format!("Add to Cart ({quantity})"))
            }
            DetailView::Found { .. } => Some("Add to Cart".to_string()),
        }
    }
}
