//! Page shell: basket counter, catalog grid, scroll lock.

use super::{attach_child, ClickHandler, ElementRef, View};

/// Gesture callbacks a composer injects into the [`Page`].
#[derive(Default)]
pub struct PageActions {
    /// Fired when the header basket button is clicked.
    pub on_basket_open: Option<ClickHandler>,
}

/// Partial attribute patch for the [`Page`].
#[derive(Default)]
pub struct PagePatch {
    /// Basket size shown on the header counter.
    pub counter: Option<usize>,
    /// Rendered catalog card targets, in catalog order.
    pub catalog: Option<Vec<ElementRef>>,
    /// Lock page scrolling while a modal is open.
    pub locked: Option<bool>,
}

/// The page shell around the catalog.
pub struct Page {
    container: ElementRef,
    wrapper: ElementRef,
    counter: ElementRef,
    gallery: ElementRef,
}

impl Page {
    /// Decorate `container` with the page's named parts.
    #[must_use]
    pub fn new(container: ElementRef, actions: PageActions) -> Self {
        let counter = attach_child(&container, "header__basket-counter");
        let basket_button = attach_child(&container, "header__basket");
        let wrapper = attach_child(&container, "page__wrapper");
        let gallery = attach_child(&wrapper, "gallery");

        if let Some(handler) = actions.on_basket_open {
            basket_button.borrow_mut().set_on_click(handler);
        }

        Self {
            container,
            wrapper,
            counter,
            gallery,
        }
    }
}

impl View for Page {
    type Patch = PagePatch;

    fn target(&self) -> &ElementRef {
        &self.container
    }

    fn apply(&mut self, patch: PagePatch) {
        if let Some(counter) = patch.counter {
            self.counter.borrow_mut().set_text(counter);
        }
        if let Some(catalog) = patch.catalog {
            self.gallery.borrow_mut().replace_children(catalog);
        }
        if let Some(locked) = patch.locked {
            self.wrapper
                .borrow_mut()
                .toggle_class("page__wrapper_locked", locked);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use super::super::{fire_click, Element};
    use super::*;

    #[test]
    fn test_counter_and_catalog() {
        let container = Element::shared("page");
        let mut page = Page::new(Rc::clone(&container), PageActions::default());

        let card_a = Element::shared("card");
        let card_b = Element::shared("card");
        page.render(PagePatch {
            counter: Some(2),
            catalog: Some(vec![Rc::clone(&card_a), Rc::clone(&card_b)]),
            ..PagePatch::default()
        });

        let counter = container.borrow().find("header__basket-counter").unwrap();
        assert_eq!(counter.borrow().text(), "2");
        let gallery = container.borrow().find("gallery").unwrap();
        assert_eq!(gallery.borrow().children().len(), 2);
    }

    #[test]
    fn test_basket_button_gesture() {
        let container = Element::shared("page");
        let opened = Rc::new(std::cell::Cell::new(false));
        let opened_inner = Rc::clone(&opened);
        let _page = Page::new(
            Rc::clone(&container),
            PageActions {
                on_basket_open: Some(Rc::new(move || {
                    opened_inner.set(true);
                    Ok(())
                })),
            },
        );

        let button = container.borrow().find("header__basket").unwrap();
        fire_click(&button).unwrap();
        assert!(opened.get());
    }

    #[test]
    fn test_scroll_lock_class() {
        let container = Element::shared("page");
        let mut page = Page::new(Rc::clone(&container), PageActions::default());

        page.render(PagePatch {
            locked: Some(true),
            ..PagePatch::default()
        });
        let wrapper = container.borrow().find("page__wrapper").unwrap();
        assert!(wrapper.borrow().has_class("page__wrapper_locked"));

        page.render(PagePatch {
            locked: Some(false),
            ..PagePatch::default()
        });
        assert!(!wrapper.borrow().has_class("page__wrapper_locked"));
    }
}
