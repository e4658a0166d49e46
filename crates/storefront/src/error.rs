//! Unified error handling.
//!
//! Each module owns a narrow error enum; `AppError` aggregates them for
//! callers (the CLI, bootstrap code) that drive several modules at once.
//! Validation problems are never errors - they are data in the
//! `FormErrors` set - and an event with no subscribers is a silent no-op,
//! so everything here is either a transport failure, a configuration
//! problem, or a programmer-contract violation surfaced as a value.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::events::DispatchError;

/// Application-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A checkout gesture was illegal or its submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// An event subscriber failed during dispatch.
    #[error("Event error: {0}")]
    Event(#[from] DispatchError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
