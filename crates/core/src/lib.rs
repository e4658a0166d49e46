//! Larek Core - Shared types library.
//!
//! This crate provides the domain types used across all Larek components:
//! - `storefront` - The reactive state/presentation core
//! - `cli` - Command-line tools for inspecting the catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no event
//! plumbing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   phone numbers, plus the catalog/order aggregates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
