//! Order submission command.
//!
//! # Usage
//!
//! ```bash
//! larek order submit \
//!     -p online -a "Spasskaya tower, Red Square" \
//!     -e dev@larek.store -n 89991234567 \
//!     --item 854cef69-976d-4c2a-a18c-2aa45046c390
//! ```
//!
//! The total is recomputed server-side, so the command fetches each item
//! first and sums the prices it will claim.

#![allow(clippy::print_stdout)]

use larek_core::{
    Email, EmailError, OrderDraft, PaymentMethod, PaymentMethodError, Phone, PhoneError, Price,
    ProductId,
};
use larek_storefront::api::{ApiError, CatalogSource, OrderGateway};
use thiserror::Error;

use super::catalog::CatalogError;

/// Errors that can occur during order submission.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Client setup failed.
    #[error(transparent)]
    Setup(#[from] CatalogError),

    /// The API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Invalid payment method.
    #[error("Invalid payment method: {0}")]
    InvalidPayment(#[from] PaymentMethodError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid phone number.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// A priceless item cannot be ordered.
    #[error("Item cannot be bought (priceless): {0}")]
    Priceless(ProductId),
}

/// Build an order from the arguments and submit it.
pub async fn submit(
    payment: &str,
    address: &str,
    email: &str,
    phone: &str,
    items: &[String],
) -> Result<(), OrderError> {
    let payment: PaymentMethod = payment.parse()?;
    let email: Email = email.parse()?;
    let phone: Phone = phone.parse()?;

    let api = super::catalog::connect()?;

    // Price each item up front so the claimed total matches the server's
    let mut total = Price::ZERO;
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = ProductId::from(item.as_str());
        let product = api.fetch_product_details(&id).await?;
        let Some(price) = product.price else {
            return Err(OrderError::Priceless(id));
        };
        total = total + price;
        ids.push(id);
    }

    let draft = OrderDraft {
        payment,
        address: address.to_owned(),
        email: email.to_string(),
        phone: phone.to_string(),
        total,
        items: ids,
    };

    tracing::info!(items = draft.items.len(), %total, "Submitting order...");
    let receipt = api.submit_order(&draft).await?;

    println!("Order {} confirmed, {} written off", receipt.id, receipt.total);

    Ok(())
}
