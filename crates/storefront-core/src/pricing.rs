use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Default sales tax applied at checkout (8%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, shipping, tax, and total for an order.
///
/// Shipping is always free. Tax is rounded to the cent, and the total is the
/// sum of the rounded parts so the displayed lines always add up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, tax_rate: Decimal) -> Self {
        let subtotal = round_cents(subtotal);
        let shipping = Decimal::ZERO;
        let tax = round_cents(subtotal * tax_rate);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a dollar amount with two decimals, e.g. `"$79.99"`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    #[test]
    fn default_tax_rate_is_eight_percent() {
        assert_eq!(DEFAULT_TAX_RATE, dec("0.08"));
    }

    #[test]
    fn summary_for_round_subtotal() {
        let summary = OrderSummary::from_subtotal(dec("100.00"), DEFAULT_TAX_RATE);
        assert_eq!(summary.subtotal, dec("100.00"));
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.tax, dec("8.00"));
        assert_eq!(summary.total, dec("108.00"));
        assert!(summary.is_free_shipping());
    }

    #[test]
    fn tax_rounds_to_cents() {
        // 79.99 * 0.08 = 6.3992
        let summary = OrderSummary::from_subtotal(dec("79.99"), DEFAULT_TAX_RATE);
        assert_eq!(summary.tax, dec("6.40"));
        assert_eq!(summary.total, dec("86.39"));
    }

    #[test]
    fn tax_midpoint_rounds_away_from_zero() {
        // 56.25 * 0.0008 = 0.045
        let summary = OrderSummary::from_subtotal(dec("56.25"), dec("0.0008"));
        assert_eq!(summary.tax, dec("0.05"));
    }

    #[test]
    fn zero_subtotal_has_zero_tax() {
        let summary = OrderSummary::from_subtotal(Decimal::ZERO, DEFAULT_TAX_RATE);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn custom_tax_rate_applies() {
        let summary = OrderSummary::from_subtotal(dec("50.00"), dec("0.10"));
        assert_eq!(summary.tax, dec("5.00"));
        assert_eq!(summary.total, dec("55.00"));
    }

    #[test]
    fn format_price_pads_to_cents() {
        assert_eq!(format_price(dec("5")), "$5.00");
        assert_eq!(format_price(dec("149.99")), "$149.99");
        assert_eq!(format_price(dec("0.125")), "$0.13");
    }
}
