//! Topic vocabulary and typed event payloads.

use core::fmt;

use larek_core::{ContactField, DeliveryField, FormErrors, OrderDraft, Price, Product};

/// The closed set of event topics flowing through the bus.
///
/// Wire names follow the `noun:verb` convention (`Display` renders them);
/// field-level edit topics use the `namespace.field:verb` shape, e.g.
/// `order.address:change`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Catalog replaced wholesale.
    CatalogChanged,
    /// Preview selection changed.
    PreviewChanged,
    /// Basket contents changed.
    BasketChanged,
    /// Basket size changed (header counter).
    CounterChanged,
    /// Gesture: open the basket panel.
    BasketOpen,
    /// Gesture: start checkout from the basket.
    CheckoutOpen,
    /// Gesture: switch the payment method.
    PaymentToggle,
    /// Validation pass finished; carries the full replaced error set.
    ValidationErrorsChanged,
    /// Delivery form became fully valid.
    DeliveryReady,
    /// Contact form became fully valid.
    ContactReady,
    /// Gesture: submit the delivery form (proceed to contacts).
    CheckoutSubmit,
    /// Gesture: submit the contact form (place the order).
    ContactsSubmit,
    /// Modal was opened.
    ModalOpen,
    /// Modal was closed.
    ModalClose,
    /// A delivery form field was edited.
    DeliveryFieldChanged(DeliveryField),
    /// A contact form field was edited.
    ContactFieldChanged(ContactField),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogChanged => f.write_str("catalog:changed"),
            Self::PreviewChanged => f.write_str("preview:changed"),
            Self::BasketChanged => f.write_str("basket:changed"),
            Self::CounterChanged => f.write_str("counter:changed"),
            Self::BasketOpen => f.write_str("basket:open"),
            Self::CheckoutOpen => f.write_str("checkout:open"),
            Self::PaymentToggle => f.write_str("payment:toggle"),
            Self::ValidationErrorsChanged => f.write_str("validation-errors:changed"),
            Self::DeliveryReady => f.write_str("delivery:ready"),
            Self::ContactReady => f.write_str("contact:ready"),
            Self::CheckoutSubmit => f.write_str("checkout:submit"),
            Self::ContactsSubmit => f.write_str("contacts:submit"),
            Self::ModalOpen => f.write_str("modal:open"),
            Self::ModalClose => f.write_str("modal:close"),
            Self::DeliveryFieldChanged(field) => {
                write!(f, "order.{}:change", field.as_order_field())
            }
            Self::ContactFieldChanged(field) => {
                write!(f, "contacts.{}:change", field.as_order_field())
            }
        }
    }
}

/// What a subscription listens for.
///
/// Exact filters match a single topic. The wildcard variants cover every
/// field of a form with one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    /// Match exactly one topic.
    Exact(Topic),
    /// Match `order.<field>:change` for any delivery field.
    AnyDeliveryField,
    /// Match `contacts.<field>:change` for any contact field.
    AnyContactField,
}

impl TopicFilter {
    /// Whether a published topic matches this filter.
    #[must_use]
    pub fn matches(&self, topic: &Topic) -> bool {
        match self {
            Self::Exact(expected) => expected == topic,
            Self::AnyDeliveryField => matches!(topic, Topic::DeliveryFieldChanged(_)),
            Self::AnyContactField => matches!(topic, Topic::ContactFieldChanged(_)),
        }
    }

    /// Whether this is an exact (non-wildcard) filter.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl From<Topic> for TopicFilter {
    fn from(topic: Topic) -> Self {
        Self::Exact(topic)
    }
}

/// Typed event payload.
///
/// Payloads carry everything a subscriber needs to react, so render
/// handlers never have to reach back into the store during dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No payload (pure gesture topics).
    #[default]
    None,
    /// The full catalog after a load.
    Catalog(Vec<Product>),
    /// The previewed product plus its current basket membership.
    Preview {
        product: Product,
        in_basket: bool,
    },
    /// Basket snapshot with the reconciled total.
    Basket {
        items: Vec<Product>,
        total: Price,
    },
    /// Basket size.
    Counter(usize),
    /// Order-in-progress snapshot.
    Order(OrderDraft),
    /// The full replaced validation error set.
    Errors(FormErrors),
    /// Edited field value (or toggled payment method name).
    Field(String),
}
