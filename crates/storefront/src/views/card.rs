//! Product card surface (catalog tile, preview, basket row).

use larek_core::Price;

use super::{attach_child, ClickHandler, ElementRef, View};

/// Gesture callbacks a composer injects into a [`Card`].
#[derive(Default)]
pub struct CardActions {
    /// Fired when the card (or its action button) is clicked.
    pub on_click: Option<ClickHandler>,
}

/// Partial attribute patch for a [`Card`].
#[derive(Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` renders the priceless state and blocks the button.
    pub price: Option<Option<Price>>,
    /// 1-based position, shown in basket rows.
    pub index: Option<usize>,
    pub button_label: Option<String>,
}

/// A product card: one view class serves the catalog tile, the preview
/// modal, and the basket row - each composer patches only the attributes
/// its template shows.
pub struct Card {
    container: ElementRef,
    title: ElementRef,
    image: ElementRef,
    price: ElementRef,
    category: ElementRef,
    description: ElementRef,
    index: ElementRef,
    button: ElementRef,
}

impl Card {
    /// Decorate `container` with the card's named parts.
    #[must_use]
    pub fn new(container: ElementRef, actions: CardActions) -> Self {
        let title = attach_child(&container, "card__title");
        let image = attach_child(&container, "card__image");
        let price = attach_child(&container, "card__price");
        let category = attach_child(&container, "card__category");
        let description = attach_child(&container, "card__text");
        let index = attach_child(&container, "basket__item-index");
        let button = attach_child(&container, "card__button");

        if let Some(handler) = actions.on_click {
            button.borrow_mut().set_on_click(handler.clone());
            container.borrow_mut().set_on_click(handler);
        }

        Self {
            container,
            title,
            image,
            price,
            category,
            description,
            index,
            button,
        }
    }

    fn set_price(&self, price: Option<Price>) {
        match price {
            Some(price) => {
                self.price.borrow_mut().set_text(price);
                self.button.borrow_mut().set_disabled(false);
            }
            None => {
                self.price.borrow_mut().set_text("Priceless");
                // Priceless items cannot be bought
                self.button.borrow_mut().set_disabled(true);
            }
        }
    }

    fn set_category(&self, category: &str) {
        let mut el = self.category.borrow_mut();
        el.set_text(category);
        el.remove_class_prefix("card__category_");
        let class = format!("card__category_{}", category_modifier(category));
        el.toggle_class(&class, true);
    }
}

/// CSS modifier for a category badge; unknown categories fall back to
/// the neutral style.
fn category_modifier(category: &str) -> &'static str {
    match category {
        "софт-скил" => "soft",
        "хард-скил" => "hard",
        "дополнительное" => "additional",
        "кнопка" => "button",
        _ => "other",
    }
}

impl View for Card {
    type Patch = CardPatch;

    fn target(&self) -> &ElementRef {
        &self.container
    }

    fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title.borrow_mut().set_text(&title);
        }
        if let Some(description) = patch.description {
            self.description.borrow_mut().set_text(description);
        }
        if let Some(image) = patch.image {
            let alt = self.title.borrow().text().to_owned();
            self.image.borrow_mut().set_image(&image, Some(&alt));
        }
        if let Some(category) = patch.category {
            self.set_category(&category);
        }
        if let Some(price) = patch.price {
            self.set_price(price);
        }
        if let Some(index) = patch.index {
            self.index.borrow_mut().set_text(index);
        }
        if let Some(label) = patch.button_label {
            self.button.borrow_mut().set_text(label);
        }
    }
}
