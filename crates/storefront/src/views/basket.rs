//! Basket panel surface.

use larek_core::Price;

use super::{attach_child, ClickHandler, ElementRef, View};

/// Gesture callbacks a composer injects into the [`BasketPanel`].
#[derive(Default)]
pub struct BasketActions {
    /// Fired when the checkout button is clicked.
    pub on_checkout: Option<ClickHandler>,
}

/// Partial attribute patch for the [`BasketPanel`].
#[derive(Default)]
pub struct BasketPatch {
    /// Rendered basket-row targets, in basket order.
    pub items: Option<Vec<ElementRef>>,
    /// Current basket total.
    pub total: Option<Price>,
}

/// The basket panel: item list, total, checkout button.
pub struct BasketPanel {
    container: ElementRef,
    list: ElementRef,
    total: ElementRef,
    button: ElementRef,
}

impl BasketPanel {
    /// Decorate `container` with the panel's named parts.
    #[must_use]
    pub fn new(container: ElementRef, actions: BasketActions) -> Self {
        let list = attach_child(&container, "basket__list");
        let total = attach_child(&container, "basket__price");
        let button = attach_child(&container, "basket__button");

        if let Some(handler) = actions.on_checkout {
            button.borrow_mut().set_on_click(handler);
        }

        Self {
            container,
            list,
            total,
            button,
        }
    }
}

impl View for BasketPanel {
    type Patch = BasketPatch;

    fn target(&self) -> &ElementRef {
        &self.container
    }

    fn apply(&mut self, patch: BasketPatch) {
        if let Some(items) = patch.items {
            self.list.borrow_mut().replace_children(items);
        }
        if let Some(total) = patch.total {
            self.total.borrow_mut().set_text(total);
            // An empty basket cannot be checked out
            self.button.borrow_mut().set_disabled(total.is_zero());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::super::{fire_click, Element};
    use super::*;

    #[test]
    fn test_total_gates_the_checkout_button() {
        let container = Element::shared("basket");
        let checkouts = Rc::new(Cell::new(0));
        let checkouts_inner = Rc::clone(&checkouts);
        let mut panel = BasketPanel::new(
            Rc::clone(&container),
            BasketActions {
                on_checkout: Some(Rc::new(move || {
                    checkouts_inner.set(checkouts_inner.get() + 1);
                    Ok(())
                })),
            },
        );

        panel.render(BasketPatch {
            total: Some(Price::ZERO),
            ..BasketPatch::default()
        });
        let button = container.borrow().find("basket__button").unwrap();
        fire_click(&button).unwrap();
        assert_eq!(checkouts.get(), 0);

        panel.render(BasketPatch {
            total: Some(Price::from(750)),
            ..BasketPatch::default()
        });
        fire_click(&button).unwrap();
        assert_eq!(checkouts.get(), 1);
    }

    #[test]
    fn test_items_replace_the_list() {
        let container = Element::shared("basket");
        let mut panel = BasketPanel::new(Rc::clone(&container), BasketActions::default());

        panel.render(BasketPatch {
            items: Some(vec![Element::shared("row"), Element::shared("row")]),
            ..BasketPatch::default()
        });
        let list = container.borrow().find("basket__list").unwrap();
        assert_eq!(list.borrow().children().len(), 2);

        panel.render(BasketPatch {
            items: Some(Vec::new()),
            ..BasketPatch::default()
        });
        assert!(list.borrow().children().is_empty());
    }
}
