//! Session-scoped shopping cart.
//!
//! [`CartStore`] is the single owner of [`CartState`] and the only place it is
//! mutated. Every state change is followed by a synchronous notification to
//! all subscribers, who see the fully updated state. Calls that leave the
//! state unchanged do not notify.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::products::{Category, Product};

/// One row in the cart: a distinct product and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Same as the originating [`Product::id`].
    pub id: String,
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Cart contents plus panel visibility. Aggregates are computed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    is_panel_open: bool,
}

impl CartState {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    /// Quantity of `id` in the cart, `0` when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.line(id).map_or(0, |l| l.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    /// Number of distinct products.
    #[must_use]
    pub fn distinct_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }
}

/// Handle returned by [`CartStore::subscribe`], used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CartState)>;

struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

/// Owner and sole mutator of the session's [`CartState`].
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.state.total_item_count()
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.state.total_price()
    }

    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.state.is_panel_open()
    }

    /// Register `callback` to run after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CartState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Add one unit of `product`, creating its line if needed.
    pub fn add_item(&mut self, product: &Product) {
        self.add_items(product, 1);
    }

    /// Add `count` units of `product` as a single change with one
    /// notification. Zero, or a line already at `u32::MAX`, is a no-op.
    pub fn add_items(&mut self, product: &Product, count: u32) {
        if count == 0 {
            return;
        }
        if let Some(pos) = self.state.position(&product.id) {
            let line = &mut self.state.lines[pos];
            let quantity = line.quantity.saturating_add(count);
            if quantity == line.quantity {
                return;
            }
            line.quantity = quantity;
            tracing::debug!(id = %product.id, quantity, "cart line incremented");
        } else {
            let mut line = CartLine::from_product(product);
            line.quantity = count;
            self.state.lines.push(line);
            tracing::debug!(id = %product.id, quantity = count, "cart line added");
        }
        self.notify();
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        if let Some(pos) = self.state.position(id) {
            self.state.lines.remove(pos);
            tracing::debug!(id, "cart line removed");
            self.notify();
        }
    }

    /// Set the quantity for `id`. Zero or negative removes the line.
    pub fn update_quantity(&mut self, id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let Some(pos) = self.state.position(id) else {
            return;
        };
        let line = &mut self.state.lines[pos];
        if line.quantity == quantity {
            return;
        }
        line.quantity = quantity;
        tracing::debug!(id, quantity, "cart line quantity updated");
        self.notify();
    }

    /// Empty the cart. Panel visibility is left alone.
    pub fn clear_cart(&mut self) {
        if self.state.lines.is_empty() {
            return;
        }
        self.state.lines.clear();
        tracing::debug!("cart cleared");
        self.notify();
    }

    pub fn open_cart(&mut self) {
        self.set_panel_open(true);
    }

    pub fn close_cart(&mut self) {
        self.set_panel_open(false);
    }

    pub fn toggle_cart(&mut self) {
        self.set_panel_open(!self.state.is_panel_open);
    }

    fn set_panel_open(&mut self, open: bool) {
        if self.state.is_panel_open == open {
            return;
        }
        self.state.is_panel_open = open;
        self.notify();
    }

    fn notify(&mut self) {
        let state = &self.state;
        for subscriber in &mut self.subscribers {
            (subscriber.callback)(state);
        }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
