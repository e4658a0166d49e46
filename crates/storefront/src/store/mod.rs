//! Reactive application-state store.
//!
//! [`AppStore`] is the single source of truth for the catalog, basket,
//! order-in-progress, validation errors, and preview selection - and the
//! only component permitted to mutate them. Every mutating operation
//! publishes one or more "changed"-suffixed events on the bus; views hold
//! no authoritative copies and render only from pushed payloads.

use std::rc::Rc;

use larek_core::{
    ContactField, DeliveryField, Email, EmailError, FormErrors, OrderDraft, OrderField, Phone,
    PhoneError, Price, Product, ProductId,
};

use crate::events::{DispatchError, EventBus, Payload, Topic};

/// Result of a store mutation; the only failure mode is a subscriber
/// refusing the resulting event.
pub type StoreResult = Result<(), DispatchError>;

/// Owns the core aggregates and publishes a change event after every
/// mutation.
pub struct AppStore {
    bus: Rc<EventBus>,
    catalog: Vec<Product>,
    basket: Vec<Product>,
    order: OrderDraft,
    form_errors: FormErrors,
    preview: Option<ProductId>,
    // Readiness latches: a ready event fires once per invalid -> valid
    // transition, not on every passing validation.
    delivery_was_valid: bool,
    contact_was_valid: bool,
}

impl AppStore {
    /// Create an empty store publishing on `bus`.
    #[must_use]
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            bus,
            catalog: Vec::new(),
            basket: Vec::new(),
            order: OrderDraft::default(),
            form_errors: FormErrors::new(),
            preview: None,
            delivery_was_valid: false,
            contact_was_valid: false,
        }
    }

    /// The current catalog, in server order.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The current basket, in first-insertion order.
    #[must_use]
    pub fn basket(&self) -> &[Product] {
        &self.basket
    }

    /// The order being assembled.
    #[must_use]
    pub fn order(&self) -> &OrderDraft {
        &self.order
    }

    /// Current validation errors (key present ⇔ field invalid).
    #[must_use]
    pub fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    /// The product currently shown in the preview, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&ProductId> {
        self.preview.as_ref()
    }

    /// Whether a product is in the basket.
    #[must_use]
    pub fn in_basket(&self, id: &ProductId) -> bool {
        self.basket.iter().any(|p| &p.id == id)
    }

    /// Sum of basket prices; priceless items count as zero.
    #[must_use]
    pub fn basket_total(&self) -> Price {
        self.basket.iter().map(Product::price_or_zero).sum()
    }

    /// Replace the catalog wholesale and announce it.
    pub fn load_catalog(&mut self, items: Vec<Product>) -> StoreResult {
        tracing::debug!(count = items.len(), "catalog loaded");
        self.catalog = items;
        self.bus
            .publish(Topic::CatalogChanged, Payload::Catalog(self.catalog.clone()))
    }

    /// Select a product for the detail preview.
    pub fn select_for_preview(&mut self, product: &Product) -> StoreResult {
        self.preview = Some(product.id.clone());
        self.bus.publish(
            Topic::PreviewChanged,
            Payload::Preview {
                product: product.clone(),
                in_basket: self.in_basket(&product.id),
            },
        )
    }

    /// Add a product to the basket. No-op if it is already present
    /// (set semantics: no product appears twice).
    pub fn add_to_basket(&mut self, product: Product) -> StoreResult {
        if self.in_basket(&product.id) {
            return Ok(());
        }
        tracing::debug!(id = %product.id, "added to basket");
        self.basket.push(product);
        self.update_basket()
    }

    /// Remove a product from the basket by identity.
    ///
    /// The change pair is re-emitted even if the product was absent
    /// (subscribers see a spurious but consistent snapshot).
    pub fn remove_from_basket(&mut self, id: &ProductId) -> StoreResult {
        tracing::debug!(%id, "removed from basket");
        self.basket.retain(|p| &p.id != id);
        self.update_basket()
    }

    /// Add the product if absent, remove it otherwise.
    pub fn toggle_basket(&mut self, product: Product) -> StoreResult {
        if self.in_basket(&product.id) {
            let id = product.id;
            self.remove_from_basket(&id)
        } else {
            self.add_to_basket(product)
        }
    }

    /// Empty the basket.
    pub fn clear_basket(&mut self) -> StoreResult {
        self.basket.clear();
        self.update_basket()
    }

    /// Reset the order-in-progress to defaults. Does not touch the basket.
    pub fn clear_order(&mut self) {
        self.order = OrderDraft::default();
        self.delivery_was_valid = false;
        self.contact_was_valid = false;
    }

    /// Snapshot the basket into the order at checkout-open time.
    ///
    /// `order.items` is fixed here and never recomputed later; `total` is
    /// reconciled to the current basket.
    pub fn open_checkout(&mut self) {
        self.order.items = self.basket.iter().map(|p| p.id.clone()).collect();
        self.order.total = self.basket_total();
    }

    /// Write a delivery-form field, then validate the delivery form.
    ///
    /// Always publishes `validation-errors:changed` with the replaced
    /// error set; additionally publishes `delivery:ready` once when the
    /// form transitions from invalid to valid.
    pub fn set_delivery_field(&mut self, field: DeliveryField, value: &str) -> StoreResult {
        match field {
            DeliveryField::Payment => match value.parse() {
                Ok(method) => self.order.payment = method,
                Err(err) => {
                    // Payment is a closed toggle; an unknown name is a
                    // wiring bug, not user input worth an error key.
                    tracing::debug!(%err, "ignoring unknown payment method");
                }
            },
            DeliveryField::Address => self.order.address = value.to_owned(),
        }

        let valid = self.validate_delivery()?;
        if valid && !self.delivery_was_valid {
            self.bus
                .publish(Topic::DeliveryReady, Payload::Order(self.order.clone()))?;
        }
        self.delivery_was_valid = valid;
        Ok(())
    }

    /// Write a contact-form field, then validate the contact form.
    ///
    /// Same event contract as [`Self::set_delivery_field`], with
    /// `contact:ready` as the readiness event.
    pub fn set_contact_field(&mut self, field: ContactField, value: &str) -> StoreResult {
        match field {
            ContactField::Email => self.order.email = value.to_owned(),
            ContactField::Phone => self.order.phone = value.to_owned(),
        }

        let valid = self.validate_contact()?;
        if valid && !self.contact_was_valid {
            self.bus
                .publish(Topic::ContactReady, Payload::Order(self.order.clone()))?;
        }
        self.contact_was_valid = valid;
        Ok(())
    }

    /// Reconcile `order.total` with the basket, then publish the change
    /// pair: `counter:changed` followed by `basket:changed`.
    fn update_basket(&mut self) -> StoreResult {
        self.order.total = self.basket_total();
        self.bus
            .publish(Topic::CounterChanged, Payload::Counter(self.basket.len()))?;
        self.bus.publish(
            Topic::BasketChanged,
            Payload::Basket {
                items: self.basket.clone(),
                total: self.order.total,
            },
        )
    }

    /// Validate the delivery form, replacing the whole error set.
    ///
    /// The payment method is a closed toggle and is always valid.
    fn validate_delivery(&mut self) -> Result<bool, DispatchError> {
        let mut errors = FormErrors::new();

        if self.order.address.is_empty() {
            errors.insert(OrderField::Address, "Address is required");
        } else if !is_valid_address(&self.order.address) {
            errors.insert(
                OrderField::Address,
                "Address must be at least 10 characters using letters, digits, \
                 spaces, or the punctuation /.,-",
            );
        }

        self.form_errors = errors;
        self.bus.publish(
            Topic::ValidationErrorsChanged,
            Payload::Errors(self.form_errors.clone()),
        )?;
        Ok(self.form_errors.is_empty())
    }

    /// Validate the contact form, replacing the whole error set.
    ///
    /// A passing phone number is stored in its normalized `+7...` form.
    fn validate_contact(&mut self) -> Result<bool, DispatchError> {
        let mut errors = FormErrors::new();

        match Email::parse(&self.order.email) {
            Ok(_) => {}
            Err(EmailError::Empty) => {
                errors.insert(OrderField::Email, "Email is required");
            }
            Err(_) => {
                errors.insert(OrderField::Email, "Invalid email address");
            }
        }

        match Phone::parse(&self.order.phone) {
            Ok(phone) => self.order.phone = phone.into_inner(),
            Err(PhoneError::Empty) => {
                errors.insert(OrderField::Phone, "Phone number is required");
            }
            Err(PhoneError::InvalidFormat) => {
                errors.insert(OrderField::Phone, "Invalid phone number format");
            }
        }

        self.form_errors = errors;
        self.bus.publish(
            Topic::ValidationErrorsChanged,
            Payload::Errors(self.form_errors.clone()),
        )?;
        Ok(self.form_errors.is_empty())
    }
}

/// Delivery address check: at least 10 characters, all drawn from Latin or
/// Cyrillic letters, digits, whitespace, and the punctuation `/ . , -`.
fn is_valid_address(address: &str) -> bool {
    address.chars().count() >= 10 && address.chars().all(is_address_char)
}

fn is_address_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
        || c.is_whitespace()
        || matches!(c, '/' | '.' | ',' | '-')
}
