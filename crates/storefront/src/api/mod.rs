//! Order API collaborators.
//!
//! The core treats the network purely as two boundary traits: a
//! [`CatalogSource`] that eventually yields the product sequence, and an
//! [`OrderGateway`] that eventually confirms or rejects an order. The core
//! neither retries nor caches - a failed call is reported and left to the
//! user to retry.
//!
//! [`LarekApi`] is the production implementation over plain REST + JSON.

use larek_core::{OrderDraft, OrderReceipt, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::LarekConfig;

/// Errors from the order API.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, malformed body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided error message, or the raw body.
        message: String,
    },

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Fetches the product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch the full product sequence, in server order.
    async fn fetch_product_list(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product by id.
    async fn fetch_product_details(&self, id: &ProductId) -> Result<Product, ApiError>;
}

/// Submits a finished order.
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    /// Submit the order; resolves with a confirmation or rejects.
    async fn submit_order(&self, order: &OrderDraft) -> Result<OrderReceipt, ApiError>;
}

/// Product as the API serves it: the image is a path relative to the CDN.
#[derive(Debug, Deserialize)]
struct ProductDto {
    id: ProductId,
    title: String,
    price: Option<larek_core::Price>,
    description: String,
    category: String,
    image: String,
}

impl ProductDto {
    fn into_product(self, cdn: &Url) -> Result<Product, ApiError> {
        let image = cdn.join(self.image.trim_start_matches('/'))?;
        Ok(Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: image.into(),
        })
    }
}

/// List response shape: `{ "total": N, "items": [...] }`.
#[derive(Debug, Deserialize)]
struct ProductListDto {
    #[allow(dead_code)]
    total: u64,
    items: Vec<ProductDto>,
}

/// Error body shape the server uses for failures.
#[derive(Debug, Deserialize)]
struct ErrorDto {
    error: String,
}

/// REST client for the Larek order API.
#[derive(Debug, Clone)]
pub struct LarekApi {
    client: reqwest::Client,
    api_url: Url,
    cdn_url: Url,
}

impl LarekApi {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &LarekConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            cdn_url: config.cdn_url.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.api_url.join(path)?;
        let response = self.client.get(url).send().await?;
        Self::check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Map a non-success status to [`ApiError::Status`], preferring the
    /// server's `{ "error": ... }` body over the raw text.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorDto>(&body)
            .map_or(body, |parsed| parsed.error);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl CatalogSource for LarekApi {
    #[instrument(skip(self))]
    async fn fetch_product_list(&self) -> Result<Vec<Product>, ApiError> {
        let list: ProductListDto = self.get_json("product/").await?;
        tracing::debug!(count = list.items.len(), "catalog fetched");
        list.items
            .into_iter()
            .map(|dto| dto.into_product(&self.cdn_url))
            .collect()
    }

    #[instrument(skip(self))]
    async fn fetch_product_details(&self, id: &ProductId) -> Result<Product, ApiError> {
        let dto: ProductDto = self.get_json(&format!("product/{id}")).await?;
        dto.into_product(&self.cdn_url)
    }
}

impl OrderGateway for LarekApi {
    #[instrument(skip_all)]
    async fn submit_order(&self, order: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        let url = self.api_url.join("order")?;
        let response = self.client.post(url).json(order).send().await?;
        Self::check_status(response).await?.json().await.map_err(Into::into)
    }
}
