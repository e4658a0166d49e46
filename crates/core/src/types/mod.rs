//! Core types for the Larek storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order;
pub mod phone;
pub mod price;
pub mod product;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{
    ContactField, DeliveryField, FormErrors, OrderDraft, OrderField, OrderReceipt, PaymentMethod,
    PaymentMethodError,
};
pub use phone::{Phone, PhoneError};
pub use price::Price;
pub use product::Product;
