//! Explicit checkout state machine.
//!
//! The two-step checkout spans the order-in-progress and the two form
//! surfaces. Its lifecycle is an explicit state machine rather than a set
//! of implicit flags:
//!
//! ```text
//! Idle → DeliveryEditing → DeliveryValid → ContactEditing → ContactValid
//!      → Submitting → Success | Failed
//! ```
//!
//! `submit` is the single asynchronous boundary of the whole core: it
//! awaits the [`OrderGateway`] collaborator and nothing else. Failure
//! lands in [`CheckoutState::Failed`], from which submit (retry) and
//! cancel are the legal gestures; the core never retries on its own.

use larek_core::OrderReceipt;

use crate::api::{ApiError, OrderGateway};
use crate::events::DispatchError;
use crate::store::AppStore;

/// Where the checkout currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// No checkout in progress.
    Idle,
    /// Delivery form open, not yet valid.
    DeliveryEditing,
    /// Delivery form valid; waiting for the proceed gesture.
    DeliveryValid,
    /// Contact form open, not yet valid.
    ContactEditing,
    /// Contact form valid; waiting for the submit gesture.
    ContactValid,
    /// Order handed to the gateway; awaiting resolution.
    Submitting,
    /// Order confirmed; basket and order have been cleared.
    Success,
    /// Submission rejected; retry or cancel.
    Failed,
}

/// A gesture arrived in a state that does not accept it.
#[derive(thiserror::Error, Debug)]
pub enum CheckoutError {
    /// The gesture is not legal in the current state.
    #[error("invalid checkout transition: {gesture} from {from:?}")]
    InvalidTransition {
        from: CheckoutState,
        gesture: &'static str,
    },
    /// The order gateway rejected the submission.
    #[error("order submission failed: {0}")]
    Submission(#[source] ApiError),
    /// A subscriber failed while reacting to a checkout side effect.
    #[error(transparent)]
    Event(#[from] DispatchError),
}

/// Drives the checkout through its states, mutating the store only at the
/// open, success, and cancel transitions.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// A fresh flow in `Idle`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// `Idle → DeliveryEditing`: the basket's checkout gesture.
    ///
    /// Takes the order's items snapshot from the current basket - here and
    /// never later.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] unless the flow is `Idle`.
    pub fn open(&mut self, store: &mut AppStore) -> Result<(), CheckoutError> {
        self.expect(CheckoutState::Idle, "open")?;
        store.open_checkout();
        self.state = CheckoutState::DeliveryEditing;
        Ok(())
    }

    /// `DeliveryEditing → DeliveryValid`: the delivery validator reported
    /// an empty error set (wired to the `delivery:ready` event).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] unless delivery is being edited.
    pub fn delivery_valid(&mut self) -> Result<(), CheckoutError> {
        self.expect(CheckoutState::DeliveryEditing, "delivery_valid")?;
        self.state = CheckoutState::DeliveryValid;
        Ok(())
    }

    /// `DeliveryValid → ContactEditing`: the explicit proceed gesture
    /// (never automatic on validity).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] unless delivery is valid.
    pub fn proceed_to_contact(&mut self) -> Result<(), CheckoutError> {
        self.expect(CheckoutState::DeliveryValid, "proceed_to_contact")?;
        self.state = CheckoutState::ContactEditing;
        Ok(())
    }

    /// `ContactEditing → ContactValid`: the contact validator reported an
    /// empty error set (wired to the `contact:ready` event).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] unless contacts are being edited.
    pub fn contact_valid(&mut self) -> Result<(), CheckoutError> {
        self.expect(CheckoutState::ContactEditing, "contact_valid")?;
        self.state = CheckoutState::ContactValid;
        Ok(())
    }

    /// `ContactValid | Failed → Submitting → Success | Failed`: hand the
    /// order to the gateway.
    ///
    /// On success the basket and order are cleared as a side effect of
    /// entering `Success`, and the confirmation is returned. On failure
    /// the flow lands in `Failed` and the user may retry; the order draft
    /// is left intact.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] for an illegal gesture,
    /// [`CheckoutError::Submission`] when the gateway rejects, or a
    /// propagated [`DispatchError`] from the clearing events.
    pub async fn submit<G: OrderGateway>(
        &mut self,
        store: &mut AppStore,
        gateway: &G,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !matches!(
            self.state,
            CheckoutState::ContactValid | CheckoutState::Failed
        ) {
            return Err(CheckoutError::InvalidTransition {
                from: self.state,
                gesture: "submit",
            });
        }

        self.state = CheckoutState::Submitting;
        match gateway.submit_order(store.order()).await {
            Ok(receipt) => {
                tracing::info!(order_id = %receipt.id, total = %receipt.total, "order confirmed");
                self.state = CheckoutState::Success;
                store.clear_basket()?;
                store.clear_order();
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "order submission failed");
                self.state = CheckoutState::Failed;
                Err(CheckoutError::Submission(err))
            }
        }
    }

    /// Exit to `Idle` via the cancel/close gesture, clearing the order
    /// draft. Legal from every state except `Submitting` and `Success`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] from `Submitting` or `Success`.
    pub fn cancel(&mut self, store: &mut AppStore) -> Result<(), CheckoutError> {
        if matches!(
            self.state,
            CheckoutState::Submitting | CheckoutState::Success
        ) {
            return Err(CheckoutError::InvalidTransition {
                from: self.state,
                gesture: "cancel",
            });
        }
        store.clear_order();
        self.state = CheckoutState::Idle;
        Ok(())
    }

    /// `Success → Idle`: acknowledge the confirmation card and return to
    /// browsing. The store was already cleared on entering `Success`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidTransition`] unless the flow is `Success`.
    pub fn finish(&mut self) -> Result<(), CheckoutError> {
        self.expect(CheckoutState::Success, "finish")?;
        self.state = CheckoutState::Idle;
        Ok(())
    }

    fn expect(&self, expected: CheckoutState, gesture: &'static str) -> Result<(), CheckoutError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.state,
                gesture,
            })
        }
    }
}
