//! Order-in-progress aggregate and its field vocabulary.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::price::Price;

/// How the customer pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay online at checkout (default).
    #[default]
    Online,
    /// Pay cash on delivery.
    Cash,
}

/// Error parsing a [`PaymentMethod`] from its wire name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0:?}")]
pub struct PaymentMethodError(pub String);

impl PaymentMethod {
    /// The wire name used in order payloads and gesture events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "cash" => Ok(Self::Cash),
            other => Err(PaymentMethodError(other.to_owned())),
        }
    }
}

/// A field of the order-in-progress, used to key validation errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        };
        f.write_str(name)
    }
}

/// A field of the delivery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryField {
    Payment,
    Address,
}

impl DeliveryField {
    /// The corresponding order field.
    #[must_use]
    pub const fn as_order_field(&self) -> OrderField {
        match self {
            Self::Payment => OrderField::Payment,
            Self::Address => OrderField::Address,
        }
    }
}

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    Phone,
}

impl ContactField {
    /// The corresponding order field.
    #[must_use]
    pub const fn as_order_field(&self) -> OrderField {
        match self {
            Self::Email => OrderField::Email,
            Self::Phone => OrderField::Phone,
        }
    }
}

/// Current validation errors, keyed by order field.
///
/// A key is present only while its field is invalid; each validation pass
/// replaces the whole set for its form, so stale messages never linger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<OrderField, String>);

impl FormErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for an invalid field.
    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The message for a field, if it is currently invalid.
    #[must_use]
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether every field is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of currently-invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// The messages alone, in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

/// The order being assembled across the two checkout forms.
///
/// Initialized to defaults at store creation, filled in incrementally, and
/// reset after a successful submission or an explicit cancel. `total` and
/// `items` are derived from the basket, never entered by the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Selected payment method (defaults to online).
    pub payment: PaymentMethod,
    /// Delivery address as entered.
    pub address: String,
    /// Contact email as entered.
    pub email: String,
    /// Contact phone; normalized to `+7...` once validation passes.
    pub phone: String,
    /// Sum of basket prices, reconciled on every basket change.
    pub total: Price,
    /// Basket snapshot taken when checkout opens.
    pub items: Vec<ProductId>,
}

/// Confirmation returned by the order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Server-issued order identifier.
    pub id: OrderId,
    /// Confirmed total written off.
    pub total: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(PaymentMethod::Online.as_str(), "online");
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_order_draft_defaults() {
        let draft = OrderDraft::default();
        assert_eq!(draft.payment, PaymentMethod::Online);
        assert_eq!(draft.address, "");
        assert_eq!(draft.total, Price::ZERO);
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_order_draft_wire_shape() {
        let draft = OrderDraft {
            payment: PaymentMethod::Cash,
            address: "Spektralnaya 15".to_owned(),
            email: "user@example.com".to_owned(),
            phone: "+79991234567".to_owned(),
            total: Price::from(750),
            items: vec![ProductId::new("p1")],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["payment"], "cash");
        assert_eq!(value["items"][0], "p1");
    }

    #[test]
    fn test_form_errors_replace_not_merge() {
        let mut errors = FormErrors::new();
        errors.insert(OrderField::Address, "Address is required");
        assert_eq!(errors.get(OrderField::Address), Some("Address is required"));
        assert_eq!(errors.len(), 1);

        // A fresh pass starts from an empty set
        let errors = FormErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.get(OrderField::Address), None);
    }

    #[test]
    fn test_form_errors_serialize_by_field_name() {
        let mut errors = FormErrors::new();
        errors.insert(OrderField::Email, "Invalid email address");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["email"], "Invalid email address");
    }
}
