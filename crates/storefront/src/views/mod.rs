//! View contract and presentation surfaces.
//!
//! Every surface implements the same contract: it is constructed bound to
//! a rendering target it decorates but does not own, and exposes a single
//! [`View::render`] operation taking a partial attribute patch. Applying a
//! patch mutates the target in place and returns it unchanged in identity,
//! so a parent surface can embed a child's rendered target.
//!
//! Views never call store operations. User gestures leave a view only as
//! bus publishes - either directly (forms publish their own field edits)
//! or through a callback injected at construction, so the composer decides
//! which topic a click maps to.

pub mod basket;
pub mod card;
pub mod form;
pub mod modal;
pub mod page;
pub mod success;

pub use basket::{BasketActions, BasketPanel, BasketPatch};
pub use card::{Card, CardActions, CardPatch};
pub use form::{ContactForm, ContactFormPatch, DeliveryForm, DeliveryFormPatch};
pub use modal::{Modal, ModalPatch};
pub use page::{Page, PageActions, PagePatch};
pub use success::{SuccessActions, SuccessCard, SuccessPatch};

use core::fmt;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::events::DispatchError;

/// What a gesture callback returns; the only failure mode is a subscriber
/// refusing the published event.
pub type GestureResult = Result<(), DispatchError>;

/// Injected click callback (wraps a bus publish).
pub type ClickHandler = Rc<dyn Fn() -> GestureResult>;

/// Injected input-edit callback (wraps a bus publish).
pub type InputHandler = Rc<dyn Fn(&str) -> GestureResult>;

/// Shared handle to a rendering target.
pub type ElementRef = Rc<RefCell<Element>>;

/// The opaque mutable visual container a view decorates.
///
/// Stands in for a DOM node: named, with text content, a CSS class set,
/// visibility/disabled flags, an optional image, children, and gesture
/// hooks. Property assignment on an element is the observable visual
/// update the core requires of its rendering targets.
pub struct Element {
    name: String,
    text: String,
    classes: BTreeSet<String>,
    hidden: bool,
    disabled: bool,
    image: Option<String>,
    alt: Option<String>,
    children: Vec<ElementRef>,
    on_click: Option<ClickHandler>,
    on_input: Option<InputHandler>,
}

impl Element {
    /// Create a named element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            classes: BTreeSet::new(),
            hidden: false,
            disabled: false,
            image: None,
            alt: None,
            children: Vec::new(),
            on_click: None,
            on_input: None,
        }
    }

    /// Create a named element behind a shared handle.
    #[must_use]
    pub fn shared(name: impl Into<String>) -> ElementRef {
        Rc::new(RefCell::new(Self::new(name)))
    }

    /// The element's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text content.
    pub fn set_text(&mut self, value: impl fmt::Display) {
        self.text = value.to_string();
    }

    /// Toggle a CSS class on or off.
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }

    /// Whether a CSS class is currently set.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Drop every class starting with `prefix` (modifier replacement).
    pub fn remove_class_prefix(&mut self, prefix: &str) {
        self.classes.retain(|c| !c.starts_with(prefix));
    }

    /// Change the blocked state.
    pub fn set_disabled(&mut self, state: bool) {
        self.disabled = state;
    }

    /// Whether the element is blocked.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Hide the element.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Show the element.
    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Whether the element is hidden.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Set the image source with alternative text.
    pub fn set_image(&mut self, src: &str, alt: Option<&str>) {
        self.image = Some(src.to_owned());
        if let Some(alt) = alt {
            self.alt = Some(alt.to_owned());
        }
    }

    /// Current image source.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Append a child element.
    pub fn append(&mut self, child: ElementRef) {
        self.children.push(child);
    }

    /// Replace all children.
    pub fn replace_children(&mut self, children: Vec<ElementRef>) {
        self.children = children;
    }

    /// Current children.
    #[must_use]
    pub fn children(&self) -> &[ElementRef] {
        &self.children
    }

    /// Find a descendant by name, depth-first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ElementRef> {
        for child in &self.children {
            if child.borrow().name == name {
                return Some(Rc::clone(child));
            }
            if let Some(found) = child.borrow().find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Register the click gesture hook.
    pub fn set_on_click(&mut self, handler: ClickHandler) {
        self.on_click = Some(handler);
    }

    /// Register the input gesture hook.
    pub fn set_on_input(&mut self, handler: InputHandler) {
        self.on_input = Some(handler);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("classes", &self.classes)
            .field("hidden", &self.hidden)
            .field("disabled", &self.disabled)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

/// Simulate a user click on an element.
///
/// Disabled elements swallow the gesture, like a disabled button.
///
/// # Errors
///
/// Propagates a handler's [`DispatchError`].
pub fn fire_click(element: &ElementRef) -> GestureResult {
    let handler = {
        let el = element.borrow();
        if el.disabled { None } else { el.on_click.clone() }
    };
    handler.map_or(Ok(()), |handler| handler())
}

/// Simulate the user editing an input element.
///
/// The element's text is updated to the new value before the hook fires.
///
/// # Errors
///
/// Propagates a handler's [`DispatchError`].
pub fn fire_input(element: &ElementRef, value: &str) -> GestureResult {
    let handler = {
        let mut el = element.borrow_mut();
        el.set_text(value);
        el.on_input.clone()
    };
    handler.map_or(Ok(()), |handler| handler(value))
}

/// The uniform rendering contract.
pub trait View {
    /// Partial attribute patch: every field optional, only present keys
    /// are applied.
    type Patch;

    /// The rendering target this view decorates.
    fn target(&self) -> &ElementRef;

    /// Apply each present key of the patch through the view's setters.
    fn apply(&mut self, patch: Self::Patch);

    /// Apply the patch and return the target - the same target, every
    /// time; render never replaces the node, only mutates it.
    fn render(&mut self, patch: Self::Patch) -> ElementRef {
        self.apply(patch);
        Rc::clone(self.target())
    }
}

/// Build a named child under a container and return its handle.
pub(crate) fn attach_child(container: &ElementRef, name: &str) -> ElementRef {
    let child = Element::shared(name);
    container.borrow_mut().append(Rc::clone(&child));
    child
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_find_descends_into_children() {
        let root = Element::shared("root");
        let mid = attach_child(&root, "mid");
        let leaf = attach_child(&mid, "leaf");

        let found = root.borrow().find("leaf").unwrap();
        assert!(Rc::ptr_eq(&found, &leaf));
        assert!(root.borrow().find("missing").is_none());
    }

    #[test]
    fn test_toggle_class() {
        let mut el = Element::new("x");
        el.toggle_class("active", true);
        assert!(el.has_class("active"));
        el.toggle_class("active", false);
        assert!(!el.has_class("active"));
    }

    #[test]
    fn test_remove_class_prefix() {
        let mut el = Element::new("x");
        el.toggle_class("card__category_soft", true);
        el.toggle_class("card__title", true);
        el.remove_class_prefix("card__category_");
        assert!(!el.has_class("card__category_soft"));
        assert!(el.has_class("card__title"));
    }

    #[test]
    fn test_disabled_element_swallows_clicks() {
        let el = Element::shared("button");
        let clicks = Rc::new(std::cell::Cell::new(0));
        {
            let clicks = Rc::clone(&clicks);
            el.borrow_mut().set_on_click(Rc::new(move || {
                clicks.set(clicks.get() + 1);
                Ok(())
            }));
        }

        fire_click(&el).unwrap();
        el.borrow_mut().set_disabled(true);
        fire_click(&el).unwrap();

        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_fire_input_updates_text_first() {
        let el = Element::shared("address");
        let seen = Rc::new(RefCell::new(String::new()));
        {
            let seen = Rc::clone(&seen);
            let el_inner = Rc::clone(&el);
            el.borrow_mut().set_on_input(Rc::new(move |value| {
                // The element already carries the new value when the hook runs
                assert_eq!(el_inner.borrow().text(), value);
                *seen.borrow_mut() = value.to_owned();
                Ok(())
            }));
        }

        fire_input(&el, "hello").unwrap();
        assert_eq!(&*seen.borrow(), "hello");
    }
}
