//! Checkout form, validation, and the checkout page state machine.
//!
//! The page moves `Editing -> Submitting -> Confirmed`. A failed validation
//! keeps it in `Editing` with per-field messages; a submission only completes
//! when the timer it was started with fires.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::pricing::OrderSummary;
use crate::timer::TimerId;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Dot-separated local part that ends on a non-apostrophe; domain labels
    // start alphanumeric and the TLD is letters only.
    Regex::new(
        r"^(?:[A-Za-z0-9_'+-]+\.)*[A-Za-z0-9_'+-]*[A-Za-z0-9_+-]@(?:[A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutField {
    FirstName,
    LastName,
    Email,
    Address,
    City,
    ZipCode,
}

impl CheckoutField {
    /// Fields in form order.
    pub const ALL: [CheckoutField; 6] = [
        CheckoutField::FirstName,
        CheckoutField::LastName,
        CheckoutField::Email,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::ZipCode,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::FirstName => "First Name",
            CheckoutField::LastName => "Last Name",
            CheckoutField::Email => "Email Address",
            CheckoutField::Address => "Street Address",
            CheckoutField::City => "City",
            CheckoutField::ZipCode => "Zip Code",
        }
    }

    /// Identifier accepted on the command line, e.g. `first_name`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            CheckoutField::FirstName => "first_name",
            CheckoutField::LastName => "last_name",
            CheckoutField::Email => "email",
            CheckoutField::Address => "address",
            CheckoutField::City => "city",
            CheckoutField::ZipCode => "zip_code",
        }
    }

    /// Returns the validation message when `value` is unacceptable.
    #[must_use]
    pub fn check(self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        match self {
            CheckoutField::FirstName if len < 2 => {
                Some("First name must be at least 2 characters")
            }
            CheckoutField::LastName if len < 2 => Some("Last name must be at least 2 characters"),
            CheckoutField::Email if !EMAIL_RE.is_match(value) => {
                Some("Please enter a valid email address")
            }
            CheckoutField::Address if len < 10 => Some("Please enter your full address"),
            CheckoutField::City if len < 2 => Some("City is required"),
            CheckoutField::ZipCode if len < 5 => Some("Please enter a valid zip code"),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CheckoutField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "firstname" | "first" => Ok(CheckoutField::FirstName),
            "lastname" | "last" => Ok(CheckoutField::LastName),
            "email" => Ok(CheckoutField::Email),
            "address" | "streetaddress" | "street" => Ok(CheckoutField::Address),
            "city" => Ok(CheckoutField::City),
            "zipcode" | "zip" => Ok(CheckoutField::ZipCode),
            _ => Err(format!(
                "unknown field '{s}'; expected one of: {}",
                CheckoutField::ALL.map(CheckoutField::key).join(", ")
            )),
        }
    }
}

/// Values typed into the checkout form plus any outstanding field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    values: BTreeMap<CheckoutField, String>,
    errors: BTreeMap<CheckoutField, String>,
}

impl CheckoutForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: CheckoutField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn error(&self, field: CheckoutField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<CheckoutField, String> {
        &self.errors
    }

    /// Store `value` and clear that field's error.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    /// Every failing field with its message, in form order.
    #[must_use]
    pub fn validate(&self) -> BTreeMap<CheckoutField, String> {
        CheckoutField::ALL
            .into_iter()
            .filter_map(|field| {
                field
                    .check(self.value(field))
                    .map(|msg| (field, msg.to_string()))
            })
            .collect()
    }
}

/// Details shown once an order has gone through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub order_id: Uuid,
    pub first_name: String,
    pub email: String,
    pub item_count: u64,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

impl Confirmation {
    /// Short order number for display, e.g. `"3F2A9C01"`.
    #[must_use]
    pub fn order_number(&self) -> String {
        self.order_id.simple().to_string()[..8].to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPhase {
    Editing,
    Submitting { timer: TimerId },
    Confirmed(Confirmation),
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; completion is pending on the given timer.
    Accepted(TimerId),
    /// Validation failed for this many fields.
    Invalid(usize),
    /// A submission is already in flight or the order is already confirmed.
    Ignored,
}

/// What the checkout page should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutScreen {
    EmptyCart,
    Form,
    Confirmed,
}

/// Page-local checkout state. Discarded when the user leaves the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPage {
    form: CheckoutForm,
    phase: CheckoutPhase,
}

impl Default for CheckoutPage {
    fn default() -> Self {
        Self {
            form: CheckoutForm::new(),
            phase: CheckoutPhase::Editing,
        }
    }
}

impl CheckoutPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    #[must_use]
    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Submitting { .. })
    }

    #[must_use]
    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.phase {
            CheckoutPhase::Confirmed(c) => Some(c),
            _ => None,
        }
    }

    /// Timer whose completion will confirm the order, if one is pending.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        match self.phase {
            CheckoutPhase::Submitting { timer } => Some(timer),
            _ => None,
        }
    }

    /// Update a field. Ignored once the order is confirmed.
    pub fn set_field(&mut self, field: CheckoutField, value: impl Into<String>) -> bool {
        if self.confirmation().is_some() {
            return false;
        }
        self.form.set(field, value);
        true
    }

    /// Validate the form and, if it passes, move to `Submitting` using the
    /// timer returned by `schedule`.
    pub fn submit<F>(&mut self, schedule: F) -> SubmitOutcome
    where
        F: FnOnce() -> TimerId,
    {
        if !matches!(self.phase, CheckoutPhase::Editing) {
            return SubmitOutcome::Ignored;
        }

        let errors = self.form.validate();
        if !errors.is_empty() {
            let count = errors.len();
            self.form.errors = errors;
            return SubmitOutcome::Invalid(count);
        }

        let timer = schedule();
        self.phase = CheckoutPhase::Submitting { timer };
        SubmitOutcome::Accepted(timer)
    }

    /// Confirm the order if `timer` is the one this page is waiting on.
    pub fn complete(&mut self, timer: TimerId, confirmation: Confirmation) -> bool {
        if self.pending_timer() != Some(timer) {
            return false;
        }
        self.phase = CheckoutPhase::Confirmed(confirmation);
        true
    }

    #[must_use]
    pub fn screen(&self, cart_is_empty: bool) -> CheckoutScreen {
        match self.phase {
            CheckoutPhase::Confirmed(_) => CheckoutScreen::Confirmed,
            _ if cart_is_empty => CheckoutScreen::EmptyCart,
            _ => CheckoutScreen::Form,
        }
    }
}

#[cfg(test)]
#[path = "checkout_test.rs"]
mod tests;
