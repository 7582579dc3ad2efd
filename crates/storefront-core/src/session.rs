//! One shopper's browsing session.
//!
//! The session owns the [`CartStore`], the current [`Page`] with its local
//! state, and every pending timer. User events arrive as method calls and are
//! applied in order. Leaving a page tears it down: its timers are cancelled
//! and its cart subscription is dropped, so nothing scheduled for a page can
//! touch state after the page is gone.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::app_config::AppConfig;
use crate::cart::{CartStore, SubscriptionId};
use crate::catalog::{Catalog, CatalogQuery, DEFAULT_RELATED_LIMIT};
use crate::checkout::{CheckoutField, CheckoutForm, CheckoutPage, Confirmation, SubmitOutcome};
use crate::pricing::{OrderSummary, DEFAULT_TAX_RATE};
use crate::products::CategoryFilter;
use crate::timer::{TimerCommand, TimerId, TimerKind};
use crate::view::{AddButton, DetailView, ProductCard, RelatedCard};

/// Tunables for a session, normally taken from [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub checkout_delay: Duration,
    pub feedback_duration: Duration,
    pub tax_rate: Decimal,
    pub related_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            checkout_delay: Duration::from_millis(1500),
            feedback_duration: Duration::from_millis(1000),
            tax_rate: DEFAULT_TAX_RATE,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            checkout_delay: Duration::from_millis(config.checkout_delay_ms),
            feedback_duration: Duration::from_millis(config.feedback_ms),
            tax_rate: config.tax_rate,
            related_limit: config.related_limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub query: CatalogQuery,
    /// Products whose card is showing "Added!", with the timer that reverts it.
    adding: BTreeMap<String, TimerId>,
}

impl CatalogPage {
    #[must_use]
    pub fn is_adding(&self, product_id: &str) -> bool {
        self.adding.contains_key(product_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub product_id: String,
    pub quantity: u32,
    adding: Option<TimerId>,
}

impl DetailPage {
    #[must_use]
    pub fn is_adding(&self) -> bool {
        self.adding.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Catalog(CatalogPage),
    ProductDetail(DetailPage),
    Cart,
    Checkout(CheckoutPage),
}

impl Page {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Page::Catalog(_) => "catalog",
            Page::ProductDetail(_) => "product",
            Page::Cart => "cart",
            Page::Checkout(_) => "checkout",
        }
    }

    /// Timers owned by this page, cancelled on teardown.
    fn timers(&self) -> Vec<TimerId> {
        match self {
            Page::Catalog(p) => p.adding.values().copied().collect(),
            Page::ProductDetail(p) => p.adding.into_iter().collect(),
            Page::Cart => Vec::new(),
            Page::Checkout(p) => p.pending_timer().into_iter().collect(),
        }
    }
}

/// Result of clicking a catalog card's add button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The card is still showing "Added!"; the click is ignored.
    Busy,
    UnknownProduct,
    /// The catalog page is not showing.
    NotOnCatalog,
}

pub struct Session {
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    cart: CartStore,
    page: Page,
    pending: BTreeMap<TimerId, TimerKind>,
    commands: Vec<TimerCommand>,
    next_timer: u64,
    badge: Rc<Cell<u64>>,
    dirty: Rc<Cell<bool>>,
    page_subscription: Option<SubscriptionId>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("page", &self.page.name())
            .field("cart", &self.cart)
            .field("pending_timers", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session on the catalog page with an empty cart.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, settings: SessionSettings) -> Self {
        let mut cart = CartStore::new();
        let badge = Rc::new(Cell::new(0));
        let header = Rc::clone(&badge);
        cart.subscribe(move |state| header.set(state.total_item_count()));

        let mut session = Self {
            catalog,
            settings,
            cart,
            page: Page::Catalog(CatalogPage::default()),
            pending: BTreeMap::new(),
            commands: Vec::new(),
            next_timer: 1,
            badge,
            dirty: Rc::new(Cell::new(true)),
            page_subscription: None,
        };
        session.subscribe_page();
        session
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Item count for the header badge; `None` when the cart is empty.
    #[must_use]
    pub fn header_badge(&self) -> Option<u64> {
        Some(self.badge.get()).filter(|&n| n > 0)
    }

    /// Whether anything visible changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        self.dirty.replace(false)
    }

    /// Timer commands accumulated since the last call, in issue order.
    pub fn take_timer_commands(&mut self) -> Vec<TimerCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.cart.total_price(), self.settings.tax_rate)
    }

    // -- navigation ---------------------------------------------------------

    pub fn go_catalog(&mut self) {
        self.navigate(Page::Catalog(CatalogPage::default()));
    }

    /// Show the detail page for `id`. Unknown ids show a not-found view.
    pub fn view_product(&mut self, id: &str) {
        if self.catalog.get(id).is_none() {
            tracing::debug!(id, "product not found");
        }
        self.navigate(Page::ProductDetail(DetailPage {
            product_id: id.to_string(),
            quantity: 1,
            adding: None,
        }));
    }

    pub fn go_cart(&mut self) {
        self.navigate(Page::Cart);
    }

    pub fn go_checkout(&mut self) {
        self.navigate(Page::Checkout(CheckoutPage::new()));
    }

    fn navigate(&mut self, next: Page) {
        self.teardown_page();
        tracing::debug!(page = next.name(), "page entered");
        self.page = next;
        self.subscribe_page();
        self.dirty.set(true);
    }

    fn teardown_page(&mut self) {
        for id in self.page.timers() {
            self.cancel_timer(id);
        }
        if let Some(sub) = self.page_subscription.take() {
            self.cart.unsubscribe(sub);
        }
        tracing::debug!(page = self.page.name(), "page torn down");
    }

    fn subscribe_page(&mut self) {
        let dirty = Rc::clone(&self.dirty);
        self.page_subscription = Some(self.cart.subscribe(move |_| dirty.set(true)));
    }

    // -- catalog page -------------------------------------------------------

    /// Returns `false` when the catalog page is not showing.
    pub fn set_search(&mut self, text: &str) -> bool {
        let Page::Catalog(page) = &mut self.page else {
            return false;
        };
        text.clone_into(&mut page.query.search);
        self.dirty.set(true);
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search("")
    }

    pub fn set_category(&mut self, filter: CategoryFilter) -> bool {
        let Page::Catalog(page) = &mut self.page else {
            return false;
        };
        page.query.category = filter;
        self.dirty.set(true);
        true
    }

    /// Cards for the products matching the current query.
    #[must_use]
    pub fn catalog_cards(&self) -> Vec<ProductCard<'_>> {
        let Page::Catalog(page) = &self.page else {
            return Vec::new();
        };
        self.catalog
            .query(&page.query)
            .into_iter()
            .map(|product| {
                let button = if page.is_adding(&product.id) {
                    AddButton::Added
                } else if self.cart.state().contains(&product.id) {
                    AddButton::AddMore
                } else {
                    AddButton::AddToCart
                };
                ProductCard { product, button }
            })
            .collect()
    }

    /// Add one unit of `id` from its catalog card.
    pub fn add_to_cart(&mut self, id: &str) -> AddOutcome {
        let Page::Catalog(page) = &self.page else {
            return AddOutcome::NotOnCatalog;
        };
        let Some(product) = self.catalog.get(id) else {
            tracing::warn!(id, "ignoring add for unknown product");
            return AddOutcome::UnknownProduct;
        };
        if page.is_adding(id) {
            return AddOutcome::Busy;
        }

        self.cart.add_item(product);
        let timer = self.schedule(
            TimerKind::AddedFeedback {
                product_id: id.to_string(),
            },
            self.settings.feedback_duration,
        );
        if let Page::Catalog(page) = &mut self.page {
            page.adding.insert(id.to_string(), timer);
        }
        self.dirty.set(true);
        AddOutcome::Added
    }

    // -- product detail page ------------------------------------------------

    #[must_use]
    pub fn detail_view(&self) -> Option<DetailView<'_>> {
        let Page::ProductDetail(page) = &self.page else {
            return None;
        };
        let Some(product) = self.catalog.get(&page.product_id) else {
            return Some(DetailView::NotFound {
                requested_id: &page.product_id,
            });
        };
        let state = self.cart.state();
        let related = self
            .catalog
            .related(product, self.settings.related_limit)
            .into_iter()
            .map(|p| RelatedCard {
                product: p,
                in_cart: state.contains(&p.id),
            })
            .collect();
        Some(DetailView::Found {
            product,
            quantity: page.quantity,
            adding: page.is_adding(),
            in_cart: state.quantity_of(&product.id),
            related,
        })
    }

    pub fn increment_quantity(&mut self) -> bool {
        self.step_quantity(|q| q.saturating_add(1))
    }

    /// Decrease the selected quantity, never below 1.
    pub fn decrement_quantity(&mut self) -> bool {
        self.step_quantity(|q| q.saturating_sub(1).max(1))
    }

    fn step_quantity(&mut self, step: impl FnOnce(u32) -> u32) -> bool {
        let Page::ProductDetail(page) = &mut self.page else {
            return false;
        };
        if self.catalog.get(&page.product_id).is_none() {
            return false;
        }
        page.quantity = step(page.quantity);
        self.dirty.set(true);
        true
    }

    /// Add the selected quantity of the shown product.
    ///
    /// Returns `false` on the not-found view, off the detail page, or while
    /// the previous add's confirmation is still showing.
    pub fn add_selected(&mut self) -> bool {
        let Page::ProductDetail(page) = &self.page else {
            return false;
        };
        if page.is_adding() {
            return false;
        }
        let Some(product) = self.catalog.get(&page.product_id) else {
            return false;
        };
        self.cart.add_items(product, page.quantity);

        let timer = self.schedule(TimerKind::DetailFeedback, self.settings.feedback_duration);
        if let Page::ProductDetail(page) = &mut self.page {
            page.adding = Some(timer);
        }
        self.dirty.set(true);
        true
    }

    // -- cart page and panel ------------------------------------------------

    /// Stepper `+` on a cart line.
    pub fn increase(&mut self, id: &str) {
        let current = self.cart.state().quantity_of(id);
        if current > 0 {
            self.cart.update_quantity(id, i64::from(current) + 1);
        }
    }

    /// Stepper `-` on a cart line; removes the line when it reaches zero.
    pub fn decrease(&mut self, id: &str) {
        let current = self.cart.state().quantity_of(id);
        if current > 0 {
            self.cart.update_quantity(id, i64::from(current) - 1);
        }
    }

    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        self.cart.update_quantity(id, quantity);
    }

    pub fn remove(&mut self, id: &str) {
        self.cart.remove_item(id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    pub fn open_panel(&mut self) {
        self.cart.open_cart();
        self.dirty.set(true);
    }

    pub fn close_panel(&mut self) {
        self.cart.close_cart();
        self.dirty.set(true);
    }

    pub fn toggle_panel(&mut self) {
        self.cart.toggle_cart();
        self.dirty.set(true);
    }

    // -- checkout page ------------------------------------------------------

    #[must_use]
    pub fn checkout_page(&self) -> Option<&CheckoutPage> {
        match &self.page {
            Page::Checkout(page) => Some(page),
            _ => None,
        }
    }

    pub fn set_field(&mut self, field: CheckoutField, value: &str) -> bool {
        let Page::Checkout(page) = &mut self.page else {
            return false;
        };
        let changed = page.set_field(field, value);
        self.dirty.set(true);
        changed
    }

    /// Submit the checkout form. `None` when the checkout page is not showing
    /// or there is nothing to check out.
    pub fn submit_order(&mut self) -> Option<SubmitOutcome> {
        if self.cart.state().is_empty() {
            return None;
        }
        let delay = self.settings.checkout_delay;

        let Page::Checkout(page) = &mut self.page else {
            return None;
        };
        // Allocate the id up front so the page can record it without holding
        // a second borrow of the session.
        let candidate = TimerId::from_raw(self.next_timer);
        let outcome = page.submit(|| candidate);

        match outcome {
            SubmitOutcome::Accepted(_) => {
                let id = self.schedule(TimerKind::OrderSubmission, delay);
                debug_assert_eq!(id, candidate);
                tracing::info!(
                    items = self.cart.total_item_count(),
                    subtotal = %self.cart.total_price(),
                    "order submitted"
                );
            }
            SubmitOutcome::Invalid(fields) => {
                tracing::debug!(fields, "checkout validation failed");
            }
            SubmitOutcome::Ignored => {}
        }
        self.dirty.set(true);
        Some(outcome)
    }

    fn confirmation_for(&self, form: &CheckoutForm) -> Confirmation {
        Confirmation {
            order_id: Uuid::new_v4(),
            first_name: form.value(CheckoutField::FirstName).to_string(),
            email: form.value(CheckoutField::Email).to_string(),
            item_count: self.cart.total_item_count(),
            summary: self.order_summary(),
            placed_at: Utc::now(),
        }
    }

    // -- timers -------------------------------------------------------------

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerId {
        let id = TimerId::from_raw(self.next_timer);
        self.next_timer += 1;
        self.pending.insert(id, kind);
        self.commands.push(TimerCommand::Schedule { id, delay });
        id
    }

    fn cancel_timer(&mut self, id: TimerId) {
        if self.pending.remove(&id).is_some() {
            self.commands.push(TimerCommand::Cancel(id));
        }
    }

    /// Apply a fired timer. Returns `false` for timers that were cancelled or
    /// never issued by this session.
    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        let Some(kind) = self.pending.remove(&id) else {
            tracing::debug!(%id, "ignoring stale timer");
            return false;
        };

        let applied = match kind {
            TimerKind::AddedFeedback { product_id } => match &mut self.page {
                Page::Catalog(page) if page.adding.get(&product_id) == Some(&id) => {
                    page.adding.remove(&product_id);
                    true
                }
                _ => false,
            },
            TimerKind::DetailFeedback => match &mut self.page {
                Page::ProductDetail(page) if page.adding == Some(id) => {
                    page.adding = None;
                    page.quantity = 1;
                    true
                }
                _ => false,
            },
            TimerKind::OrderSubmission => self.complete_order(id),
        };

        if applied {
            self.dirty.set(true);
        } else {
            tracing::debug!(%id, "timer fired for a page that is gone");
        }
        applied
    }

    fn complete_order(&mut self, id: TimerId) -> bool {
        let confirmation = match &self.page {
            Page::Checkout(page) if page.pending_timer() == Some(id) => {
                self.confirmation_for(page.form())
            }
            _ => return false,
        };
        let order_number = confirmation.order_number();
        let total = confirmation.summary.total;

        let Page::Checkout(page) = &mut self.page else {
            return false;
        };
        if !page.complete(id, confirmation) {
            return false;
        }
        self.cart.clear_cart();
        tracing::info!(order = %order_number, %total, "order confirmed");
        true
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
