//! Larek Storefront - event-driven reactive core.
//!
//! Three layers, dependency order leaves-first:
//!
//! 1. [`events`] - a publish/subscribe broker with a closed topic
//!    vocabulary. Every component communicates exclusively through it; no
//!    component holds a direct reference to another component's internals.
//! 2. [`store`] - the single source of truth for the catalog, basket,
//!    order-in-progress, validation errors, and preview selection. Every
//!    mutation publishes events describing what changed.
//! 3. [`views`] - the uniform render/patch contract implemented by every
//!    presentation surface, plus the concrete surfaces themselves. Views
//!    render from pushed data and forward user gestures back onto the bus.
//!
//! Control flow is strictly unidirectional per hop:
//! user gesture → bus event → state mutation → bus event → view re-render.
//!
//! The [`checkout`] state machine drives the two-step checkout and owns
//! the single asynchronous boundary: submitting the order through the
//! [`api`] collaborator.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod events;
pub mod store;
pub mod views;

pub use error::{AppError, Result};
