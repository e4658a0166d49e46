//! Integration tests for the Larek storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larek-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Full basket-to-confirmation journeys over the bus
//! - `basket_events` - Gesture wiring between views, bus, and store
//!
//! The harness here stands in for the composition root: product fixtures,
//! a programmable [`StubGateway`], and a bus-wide topic recorder.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use larek_core::{OrderDraft, OrderId, OrderReceipt, Price, Product, ProductId};
use larek_storefront::api::{ApiError, OrderGateway};
use larek_storefront::events::{EventBus, Topic, TopicFilter};

/// A product fixture with the given id and optional price.
#[must_use]
pub fn product(id: &str, price: Option<i64>) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("product {id}"),
        price: price.map(Price::from),
        description: format!("description of {id}"),
        category: "другое".to_owned(),
        image: format!("https://cdn.example/{id}.svg"),
    }
}

/// A small catalog in the shape the live API serves it.
///
/// # Panics
///
/// Panics if the embedded fixture is malformed; that is a test-harness bug.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_catalog() -> Vec<Product> {
    serde_json::from_str(
        r#"[
            {
                "id": "hour-plus",
                "title": "+1 час в сутках",
                "price": 750,
                "description": "Если планируете решать задачи в тренажёре, берите два.",
                "category": "софт-скил",
                "image": "https://cdn.example/5_Dots.svg"
            },
            {
                "id": "timer-mom",
                "title": "Мамка-таймер",
                "price": null,
                "description": "Будет стоять над душой и не давать прокрастинировать.",
                "category": "другое",
                "image": "https://cdn.example/Shell.svg"
            },
            {
                "id": "hard-skill",
                "title": "Бэкенд-антистресс",
                "price": 1000,
                "description": "Если мир рухнет, запустите этот антистресс и зависните на пару часов.",
                "category": "хард-скил",
                "image": "https://cdn.example/Polygon.svg"
            }
        ]"#,
    )
    .unwrap()
}

/// An in-memory order gateway with programmable failure.
#[derive(Default)]
pub struct StubGateway {
    /// When set, the next submission is rejected with a 500.
    pub fail: Cell<bool>,
    /// Number of submissions attempted.
    pub calls: Cell<usize>,
    /// The draft most recently handed to the gateway.
    pub last_order: RefCell<Option<OrderDraft>>,
}

impl StubGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderGateway for StubGateway {
    async fn submit_order(&self, order: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_order.borrow_mut() = Some(order.clone());
        if self.fail.get() {
            Err(ApiError::Status {
                status: 500,
                message: "out of synapses".to_owned(),
            })
        } else {
            Ok(OrderReceipt {
                id: OrderId::new(format!("order-{}", self.calls.get())),
                total: order.total,
            })
        }
    }
}

/// Record every topic published on `bus`, in dispatch order.
pub fn record_topics(bus: &Rc<EventBus>) -> Rc<RefCell<Vec<Topic>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let filters = [
        TopicFilter::Exact(Topic::CatalogChanged),
        TopicFilter::Exact(Topic::PreviewChanged),
        TopicFilter::Exact(Topic::BasketChanged),
        TopicFilter::Exact(Topic::CounterChanged),
        TopicFilter::Exact(Topic::BasketOpen),
        TopicFilter::Exact(Topic::CheckoutOpen),
        TopicFilter::Exact(Topic::PaymentToggle),
        TopicFilter::Exact(Topic::ValidationErrorsChanged),
        TopicFilter::Exact(Topic::DeliveryReady),
        TopicFilter::Exact(Topic::ContactReady),
        TopicFilter::Exact(Topic::CheckoutSubmit),
        TopicFilter::Exact(Topic::ContactsSubmit),
        TopicFilter::Exact(Topic::ModalOpen),
        TopicFilter::Exact(Topic::ModalClose),
        TopicFilter::AnyDeliveryField,
        TopicFilter::AnyContactField,
    ];
    for filter in filters {
        let log = Rc::clone(&log);
        bus.subscribe(filter, move |event| {
            log.borrow_mut().push(event.topic.clone());
            Ok(())
        });
    }
    log
}

/// Occurrences of `topic` in a recorded log.
#[must_use]
pub fn count_topic(log: &Rc<RefCell<Vec<Topic>>>, topic: &Topic) -> usize {
    log.borrow().iter().filter(|t| *t == topic).count()
}
