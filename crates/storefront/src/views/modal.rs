//! Modal chrome hosting preview, basket, forms, and confirmation.

use std::rc::Rc;

use super::{attach_child, ElementRef, GestureResult, View};
use crate::events::{DispatchError, EventBus, Payload, Topic};

const ACTIVE_CLASS: &str = "modal_active";

/// Partial attribute patch for the [`Modal`].
#[derive(Default)]
pub struct ModalPatch {
    /// Embedded content target (a child surface's rendered target).
    pub content: Option<ElementRef>,
}

/// The shared modal container. Opening and closing are announced on the
/// bus so the page shell can lock and unlock scrolling.
pub struct Modal {
    container: ElementRef,
    content: ElementRef,
    bus: Rc<EventBus>,
}

impl Modal {
    /// Decorate `container`; the modal starts hidden.
    #[must_use]
    pub fn new(container: ElementRef, bus: Rc<EventBus>) -> Self {
        let content = attach_child(&container, "modal__content");
        container.borrow_mut().hide();
        Self {
            container,
            content,
            bus,
        }
    }

    /// Whether the modal is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.container.borrow().is_hidden()
    }

    /// Show the modal and announce `modal:open`.
    ///
    /// # Errors
    ///
    /// Propagates a subscriber's [`DispatchError`].
    pub fn open(&mut self) -> GestureResult {
        {
            let mut el = self.container.borrow_mut();
            el.show();
            el.toggle_class(ACTIVE_CLASS, true);
        }
        self.bus.publish(Topic::ModalOpen, Payload::None)
    }

    /// Hide the modal, drop its content, and announce `modal:close`.
    ///
    /// # Errors
    ///
    /// Propagates a subscriber's [`DispatchError`].
    pub fn close(&mut self) -> GestureResult {
        {
            let mut el = self.container.borrow_mut();
            el.toggle_class(ACTIVE_CLASS, false);
            el.hide();
        }
        self.content.borrow_mut().replace_children(Vec::new());
        self.bus.publish(Topic::ModalClose, Payload::None)
    }

    /// Render `content` into the modal and open it in one step.
    ///
    /// # Errors
    ///
    /// Propagates a subscriber's [`DispatchError`].
    pub fn present(&mut self, content: ElementRef) -> Result<ElementRef, DispatchError> {
        let target = self.render(ModalPatch {
            content: Some(content),
        });
        self.open()?;
        Ok(target)
    }
}

impl View for Modal {
    type Patch = ModalPatch;

    fn target(&self) -> &ElementRef {
        &self.container
    }

    fn apply(&mut self, patch: ModalPatch) {
        if let Some(content) = patch.content {
            self.content.borrow_mut().replace_children(vec![content]);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::super::Element;
    use super::*;

    #[test]
    fn test_present_embeds_and_announces() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        for topic in [Topic::ModalOpen, Topic::ModalClose] {
            let log = Rc::clone(&log);
            bus.on(topic, move |event| {
                log.borrow_mut().push(event.topic.clone());
                Ok(())
            });
        }

        let container = Element::shared("modal");
        let mut modal = Modal::new(Rc::clone(&container), Rc::clone(&bus));
        assert!(!modal.is_open());

        let card = Element::shared("card");
        let returned = modal.present(Rc::clone(&card)).unwrap();
        assert!(Rc::ptr_eq(&returned, &container));
        assert!(modal.is_open());

        let content = container.borrow().find("modal__content").unwrap();
        assert!(Rc::ptr_eq(content.borrow().children().first().unwrap(), &card));

        modal.close().unwrap();
        assert!(!modal.is_open());
        assert!(content.borrow().children().is_empty());
        assert_eq!(log.borrow().as_slice(), [Topic::ModalOpen, Topic::ModalClose]);
    }

    #[test]
    fn test_new_content_replaces_old() {
        let bus = Rc::new(EventBus::new());
        let container = Element::shared("modal");
        let mut modal = Modal::new(Rc::clone(&container), bus);

        modal.present(Element::shared("first")).unwrap();
        let second = Element::shared("second");
        modal.present(Rc::clone(&second)).unwrap();

        let content = container.borrow().find("modal__content").unwrap();
        let children = content.borrow().children().to_vec();
        assert_eq!(children.len(), 1);
        assert!(Rc::ptr_eq(children.first().unwrap(), &second));
    }
}
