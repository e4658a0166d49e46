//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List all products
//! larek catalog list
//!
//! # Show a single product
//! larek catalog show -i 854cef69-976d-4c2a-a18c-2aa45046c390
//! ```

#![allow(clippy::print_stdout)]

use larek_core::ProductId;
use larek_storefront::api::{ApiError, CatalogSource, LarekApi};
use larek_storefront::config::{ConfigError, LarekConfig};
use thiserror::Error;

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Print the full product catalog, one line per product.
pub async fn list() -> Result<(), CatalogError> {
    let api = connect()?;

    tracing::info!("Fetching product catalog...");
    let products = api.fetch_product_list().await?;

    for product in &products {
        let price = product
            .price
            .map_or_else(|| "priceless".to_owned(), |p| p.to_string());
        println!("{}  {}  [{}]  {}", product.id, product.title, product.category, price);
    }
    println!("{} products", products.len());

    Ok(())
}

/// Print a single product as pretty JSON.
pub async fn show(id: &str) -> Result<(), CatalogError> {
    let api = connect()?;
    let id = ProductId::from(id);

    tracing::info!("Fetching product {id}...");
    let product = api.fetch_product_details(&id).await?;

    match serde_json::to_string_pretty(&product) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{product:#?}"),
    }

    Ok(())
}

pub(crate) fn connect() -> Result<LarekApi, CatalogError> {
    let config = LarekConfig::from_env()?;
    Ok(LarekApi::new(&config)?)
}
