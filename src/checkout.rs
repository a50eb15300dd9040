//! Checkout form: validation, phone masking, order submission.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::cart::{CartStore, StorageError, StringStore};

/// National prefix every customer phone must carry.
pub const PHONE_PREFIX: &str = "+996";
/// Minimum digit count of a complete number, country code included.
pub const PHONE_MIN_DIGITS: usize = 12;

const MSG_NAME: &str = "Укажи имя";
const MSG_ADDRESS: &str = "Укажи адрес";
const MSG_PHONE: &str = "Телефон в формате +996";

/// Raw field values as typed by the customer. `city` and `comment` are
/// free-form and never block submission.
#[derive(Clone, Debug, Default, Validate)]
pub struct CheckoutForm {
    #[validate(custom = "non_blank")]
    pub name: String,
    #[validate(custom = "kg_phone")]
    pub phone: String,
    #[validate(custom = "non_blank")]
    pub address: String,
    pub city: String,
    pub comment: String,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn kg_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if value.trim().starts_with(PHONE_PREFIX) && digits >= PHONE_MIN_DIGITS {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Per-field messages. Computed on every input event; the caller decides
/// when to show them (typically after a submit attempt).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub address: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

/// Validate the form into field-keyed messages.
pub fn validate_form(form: &CheckoutForm) -> FieldErrors {
    let mut out = FieldErrors::default();
    if let Err(errors) = form.validate() {
        let fields = errors.field_errors();
        if fields.contains_key("name") {
            out.name = Some(MSG_NAME);
        }
        if fields.contains_key("phone") {
            out.phone = Some(MSG_PHONE);
        }
        if fields.contains_key("address") {
            out.address = Some(MSG_ADDRESS);
        }
    }
    out
}

/// Submit is available only while the form validates and the cart holds at
/// least one item.
pub fn submit_enabled(form: &CheckoutForm, cart_count: u32) -> bool {
    validate_form(form).is_valid() && cart_count > 0
}

/// Re-render the canonical mask from the raw digit stream: strip non-digits,
/// drop one leading `996`, regroup as `+996 aaa bbb ccc`. Digits past the
/// ninth are discarded, so the mask never grows past a complete number.
pub fn mask_phone(input: &str) -> String {
    let mut digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix("996") {
        digits = rest.to_string();
    }

    let mut out = String::from(PHONE_PREFIX);
    for (start, end) in [(0, 3), (3, 6), (6, 9)] {
        if digits.len() <= start {
            break;
        }
        out.push(' ');
        out.push_str(&digits[start..digits.len().min(end)]);
    }
    out
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("form has invalid fields")]
    Invalid(FieldErrors),
    #[error("cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Display-only outcome of a successful submission. The order id carries no
/// uniqueness guarantee and is never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// Cosmetic order id: `AU-` plus two random four-hex-digit segments.
pub fn order_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("AU-{:04X}{:04X}", rng.random::<u16>(), rng.random::<u16>())
}

pub fn new_order_id() -> String {
    order_id_with(&mut rand::rng())
}

/// Validate, check the cart, then clear it and hand back a confirmation.
/// On success the caller resets its form fields, which in turn disables
/// submit because the cart is now empty.
pub fn submit<S: StringStore>(
    store: &CartStore<S>,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    let errors = validate_form(form);
    if !errors.is_valid() {
        return Err(CheckoutError::Invalid(errors));
    }
    if store.count() == 0 {
        return Err(CheckoutError::EmptyCart);
    }

    let total = store.subtotal();
    store.clear()?;

    let confirmation = OrderConfirmation {
        order_id: new_order_id(),
        total,
        placed_at: Utc::now(),
    };
    info!(order_id = %confirmation.order_id, %total, "order placed");
    Ok(confirmation)
}
