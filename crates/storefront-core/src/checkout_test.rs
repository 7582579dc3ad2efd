use rust_decimal::Decimal;

use super::*;
use crate::pricing::DEFAULT_TAX_RATE;

fn valid_form() -> CheckoutForm {
    let mut form = CheckoutForm::new();
    form.set(CheckoutField::FirstName, "Ada");
    form.set(CheckoutField::LastName, "Lovelace");
    form.set(CheckoutField::Email, "ada@example.com");
    form.set(CheckoutField::Address, "12 Analytical Row");
    form.set(CheckoutField::City, "London");
    form.set(CheckoutField::ZipCode, "10115");
    form
}

fn confirmation() -> Confirmation {
    Confirmation {
        order_id: Uuid::nil(),
        first_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        item_count: 1,
        summary: OrderSummary::from_subtotal(Decimal::new(1000, 2), DEFAULT_TAX_RATE),
        placed_at: Utc::now(),
    }
}

fn page_with(form: CheckoutForm) -> CheckoutPage {
    CheckoutPage {
        form,
        phase: CheckoutPhase::Editing,
    }
}

#[test]
fn valid_form_has_no_errors() {
    assert!(valid_form().validate().is_empty());
}

#[test]
fn empty_form_fails_every_field() {
    let errors = CheckoutForm::new().validate();
    assert_eq!(errors.len(), 6);
    assert_eq!(
        errors.get(&CheckoutField::City).map(String::as_str),
        Some("City is required")
    );
}

#[test]
fn short_first_name_is_rejected() {
    assert_eq!(
        CheckoutField::FirstName.check("A"),
        Some("First name must be at least 2 characters")
    );
    assert_eq!(CheckoutField::FirstName.check("Al"), None);
}

#[test]
fn email_validation() {
    for good in [
        "a@b.co",
        "first.last+tag@mail.example.org",
        "o'brien@example.com",
        "under_score@sub-domain.example.io",
    ] {
        assert_eq!(CheckoutField::Email.check(good), None, "{good} should pass");
    }
    for bad in [
        "",
        "plain",
        "a@b",
        "@example.com",
        "a b@example.com",
        ".a@example.com",
        "a..b@example.com",
        "a.@example.com",
        "a@-example.com",
        "a@example.c0m",
    ] {
        assert_eq!(
            CheckoutField::Email.check(bad),
            Some("Please enter a valid email address"),
            "{bad} should fail"
        );
    }
}

#[test]
fn address_needs_ten_characters() {
    assert!(CheckoutField::Address.check("1 Main St").is_some());
    assert!(CheckoutField::Address.check("10 Main St").is_none());
}

#[test]
fn zip_needs_five_characters() {
    assert!(CheckoutField::ZipCode.check("1234").is_some());
    assert!(CheckoutField::ZipCode.check("12345").is_none());
}

#[test]
fn field_parses_several_spellings() {
    assert_eq!("first_name".parse::<CheckoutField>(), Ok(CheckoutField::FirstName));
    assert_eq!("firstName".parse::<CheckoutField>(), Ok(CheckoutField::FirstName));
    assert_eq!("zip".parse::<CheckoutField>(), Ok(CheckoutField::ZipCode));
    assert_eq!("Zip-Code".parse::<CheckoutField>(), Ok(CheckoutField::ZipCode));
    assert!("phone".parse::<CheckoutField>().is_err());
}

#[test]
fn submit_missing_field_blocks_and_reports_error() {
    let mut form = valid_form();
    form.set(CheckoutField::Email, "");
    let mut page = page_with(form);

    let mut scheduled = false;
    let outcome = page.submit(|| {
        scheduled = true;
        TimerId::from_raw(1)
    });

    assert_eq!(outcome, SubmitOutcome::Invalid(1));
    assert!(!scheduled, "no timer for an invalid form");
    assert_eq!(*page.phase(), CheckoutPhase::Editing);
    let msg = page.form().error(CheckoutField::Email).unwrap_or_default();
    assert!(!msg.is_empty());
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut page = CheckoutPage::new();
    let _ = page.submit(|| TimerId::from_raw(1));
    assert_eq!(page.form().errors().len(), 6);

    page.set_field(CheckoutField::City, "P");
    assert!(page.form().error(CheckoutField::City).is_none());
    assert!(page.form().error(CheckoutField::ZipCode).is_some());
    assert_eq!(page.form().errors().len(), 5);
}

#[test]
fn submit_valid_form_moves_to_submitting() {
    let mut page = page_with(valid_form());
    let outcome = page.submit(|| TimerId::from_raw(7));
    assert_eq!(outcome, SubmitOutcome::Accepted(TimerId::from_raw(7)));
    assert!(page.is_submitting());
    assert_eq!(page.pending_timer(), Some(TimerId::from_raw(7)));
}

#[test]
fn second_submit_while_submitting_is_ignored() {
    let mut page = page_with(valid_form());
    let _ = page.submit(|| TimerId::from_raw(1));
    let outcome = page.submit(|| panic!("must not schedule twice"));
    assert_eq!(outcome, SubmitOutcome::Ignored);
}

#[test]
fn complete_requires_matching_timer() {
    let mut page = page_with(valid_form());
    let _ = page.submit(|| TimerId::from_raw(3));

    assert!(!page.complete(TimerId::from_raw(4), confirmation()));
    assert!(page.is_submitting());

    assert!(page.complete(TimerId::from_raw(3), confirmation()));
    assert!(page.confirmation().is_some());
    assert!(!page.set_field(CheckoutField::City, "Paris"));
}

#[test]
fn complete_without_submission_is_rejected() {
    let mut page = CheckoutPage::new();
    assert!(!page.complete(TimerId::from_raw(1), confirmation()));
}

#[test]
fn screen_reflects_cart_and_phase() {
    let mut page = page_with(valid_form());
    assert_eq!(page.screen(true), CheckoutScreen::EmptyCart);
    assert_eq!(page.screen(false), CheckoutScreen::Form);

    let _ = page.submit(|| TimerId::from_raw(1));
    assert!(page.complete(TimerId::from_raw(1), confirmation()));
    assert_eq!(page.screen(true), CheckoutScreen::Confirmed);
}

#[test]
fn order_number_is_eight_uppercase_hex_chars() {
    let mut c = confirmation();
    c.order_id = Uuid::parse_str("3f2a9c01-0000-4000-8000-000000000000").unwrap();
    assert_eq!(c.order_number(), "3F2A9C01");
}
