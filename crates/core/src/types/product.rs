//! Catalog product entry.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// An immutable catalog entry.
///
/// Products are created wholesale by a catalog load and never mutated
/// afterwards; a `price` of `None` marks a priceless item that cannot be
/// bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-issued unique identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price in synapses, or `None` for priceless items.
    pub price: Option<Price>,
    /// Long description shown in the preview card.
    pub description: String,
    /// Category label (drives the card's category badge styling).
    pub category: String,
    /// Absolute image URL (CDN prefix already applied).
    pub image: String,
}

impl Product {
    /// The product's price, with priceless items counted as zero.
    #[must_use]
    pub fn price_or_zero(&self) -> Price {
        self.price.unwrap_or(Price::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_or_zero() {
        let mut product = Product {
            id: ProductId::new("p1"),
            title: "+1 час в сутках".to_owned(),
            price: Some(Price::from(750)),
            description: String::new(),
            category: "софт-скил".to_owned(),
            image: "https://cdn.example/1.svg".to_owned(),
        };
        assert_eq!(product.price_or_zero(), Price::from(750));

        product.price = None;
        assert_eq!(product.price_or_zero(), Price::ZERO);
    }

    #[test]
    fn test_deserialize_from_api_shape() {
        let json = r#"{
            "id": "854cef69-976b-4c2a-a18c-2aa45046c390",
            "description": "Если планируете решать задачи в тренажёре, берите два.",
            "image": "/5_Dots.svg",
            "title": "+1 час в сутках",
            "category": "софт-скил",
            "price": 750
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Some(Price::from(750)));

        let priceless = r#"{
            "id": "b06cde61-912f-4663-9751-09956c0eed67",
            "description": "Будет стоять над душой и не давать прокрастинировать.",
            "image": "/Shell.svg",
            "title": "Мамка-таймер",
            "category": "другое",
            "price": null
        }"#;
        let product: Product = serde_json::from_str(priceless).unwrap();
        assert_eq!(product.price, None);
    }
}
