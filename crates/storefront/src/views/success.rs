//! Order confirmation surface.

use larek_core::Price;

use super::{attach_child, ClickHandler, ElementRef, View};

/// Gesture callbacks a composer injects into the [`SuccessCard`].
#[derive(Default)]
pub struct SuccessActions {
    /// Fired when the close button is clicked.
    pub on_close: Option<ClickHandler>,
}

/// Partial attribute patch for the [`SuccessCard`].
#[derive(Default)]
pub struct SuccessPatch {
    /// Confirmed total from the order receipt.
    pub total: Option<Price>,
}

/// Shown inside the modal after the gateway confirms the order.
pub struct SuccessCard {
    container: ElementRef,
    description: ElementRef,
}

impl SuccessCard {
    /// Decorate `container` with the confirmation's named parts.
    #[must_use]
    pub fn new(container: ElementRef, actions: SuccessActions) -> Self {
        let description = attach_child(&container, "order-success__description");
        let close = attach_child(&container, "order-success__close");

        if let Some(handler) = actions.on_close {
            close.borrow_mut().set_on_click(handler);
        }

        Self {
            container,
            description,
        }
    }
}

impl View for SuccessCard {
    type Patch = SuccessPatch;

    fn target(&self) -> &ElementRef {
        &self.container
    }

    fn apply(&mut self, patch: SuccessPatch) {
        if let Some(total) = patch.total {
            self.description
                .borrow_mut()
                .set_text(format!("Written off {total}"));
        }
    }
}
