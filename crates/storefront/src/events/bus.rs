//! The event bus itself.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::topic::{Payload, Topic, TopicFilter};

/// What a handler returns; any error aborts the in-flight dispatch.
pub type HandlerResult = Result<(), Box<dyn std::error::Error>>;

type Handler = Box<dyn FnMut(&Event) -> HandlerResult>;

/// A published event: topic plus its typed payload.
#[derive(Debug, Clone)]
pub struct Event {
    pub topic: Topic,
    pub payload: Payload,
}

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A handler failed while the bus was delivering an event.
///
/// The bus does not isolate handler failures: dispatch stops at the first
/// failing handler and the error propagates to the publisher. Handlers
/// registered after the failing one do not see the event.
#[derive(thiserror::Error, Debug)]
#[error("handler for '{topic}' failed: {source}")]
pub struct DispatchError {
    /// The topic whose delivery failed.
    pub topic: Topic,
    #[source]
    source: Box<dyn std::error::Error>,
}

struct Subscription {
    id: SubscriptionId,
    filter: TopicFilter,
    handler: Rc<RefCell<Handler>>,
}

/// Synchronous, single-threaded publish/subscribe broker.
///
/// Matching handlers fire in registration order, exact subscriptions
/// before wildcard ones. Publishing a topic nobody listens to is a silent
/// no-op. The matching handler list is snapshotted before dispatch, so a
/// handler may subscribe or unsubscribe during delivery without affecting
/// the in-flight event.
#[derive(Default)]
pub struct EventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every topic matching `filter`.
    pub fn subscribe<F>(&self, filter: TopicFilter, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> HandlerResult + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            filter,
            handler: Rc::new(RefCell::new(Box::new(handler))),
        });
        id
    }

    /// Register a handler for a single exact topic.
    pub fn on<F>(&self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> HandlerResult + 'static,
    {
        self.subscribe(TopicFilter::Exact(topic), handler)
    }

    /// Publish an event to every matching handler, synchronously.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] wrapping the first handler failure;
    /// remaining handlers are not invoked.
    pub fn publish(&self, topic: Topic, payload: Payload) -> Result<(), DispatchError> {
        let event = Event { topic, payload };

        // Snapshot matching handlers: exact filters first, then wildcards,
        // each in registration order.
        let matching: Vec<Rc<RefCell<Handler>>> = {
            let subscriptions = self.subscriptions.borrow();
            let exact = subscriptions
                .iter()
                .filter(|s| s.filter.is_exact() && s.filter.matches(&event.topic));
            let wildcard = subscriptions
                .iter()
                .filter(|s| !s.filter.is_exact() && s.filter.matches(&event.topic));
            exact
                .chain(wildcard)
                .map(|s| Rc::clone(&s.handler))
                .collect()
        };

        tracing::trace!(topic = %event.topic, handlers = matching.len(), "dispatch");

        for handler in matching {
            (handler.borrow_mut())(&event).map_err(|source| DispatchError {
                topic: event.topic.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Remove one subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() < before
    }

    /// Remove every subscription (view teardown).
    pub fn unsubscribe_all(&self) {
        self.subscriptions.borrow_mut().clear();
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use larek_core::DeliveryField;

    fn record(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> impl FnMut(&Event) -> HandlerResult + use<> {
        let log = Rc::clone(log);
        let tag = tag.to_owned();
        move |event| {
            log.borrow_mut().push(format!("{tag}:{}", event.topic));
            Ok(())
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(Topic::BasketOpen, Payload::None).unwrap();
    }

    #[test]
    fn test_handlers_fire_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on(Topic::BasketChanged, record(&log, "a"));
        bus.on(Topic::BasketChanged, record(&log, "b"));
        bus.on(Topic::CounterChanged, record(&log, "c"));

        bus.publish(Topic::BasketChanged, Payload::Counter(1)).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            ["a:basket:changed", "b:basket:changed"]
        );
    }

    #[test]
    fn test_exact_subscriptions_fire_before_wildcards() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        // Wildcard registered first, but the exact subscription still fires first.
        bus.subscribe(TopicFilter::AnyDeliveryField, record(&log, "wild"));
        bus.on(
            Topic::DeliveryFieldChanged(DeliveryField::Address),
            record(&log, "exact"),
        );

        bus.publish(
            Topic::DeliveryFieldChanged(DeliveryField::Address),
            Payload::Field("Spektralnaya 15".to_owned()),
        )
        .unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            ["exact:order.address:change", "wild:order.address:change"]
        );
    }

    #[test]
    fn test_wildcard_covers_every_field() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(TopicFilter::AnyDeliveryField, record(&log, "w"));

        bus.publish(
            Topic::DeliveryFieldChanged(DeliveryField::Payment),
            Payload::Field("cash".to_owned()),
        )
        .unwrap();
        bus.publish(
            Topic::DeliveryFieldChanged(DeliveryField::Address),
            Payload::Field("x".to_owned()),
        )
        .unwrap();

        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_failing_handler_aborts_delivery() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on(Topic::ModalOpen, record(&log, "first"));
        bus.on(Topic::ModalOpen, |_event| Err("boom".into()));
        bus.on(Topic::ModalOpen, record(&log, "third"));

        let err = bus.publish(Topic::ModalOpen, Payload::None).unwrap_err();

        assert_eq!(err.topic, Topic::ModalOpen);
        // The first handler ran, the third never saw the event.
        assert_eq!(log.borrow().as_slice(), ["first:modal:open"]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = bus.on(Topic::ModalClose, record(&log, "x"));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        bus.publish(Topic::ModalClose, Payload::None).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_all() {
        let bus = EventBus::new();
        bus.on(Topic::ModalOpen, |_| Ok(()));
        bus.on(Topic::ModalClose, |_| Ok(()));
        assert_eq!(bus.subscription_count(), 2);

        bus.unsubscribe_all();
        assert_eq!(bus.subscription_count(), 0);
    }

    #[test]
    fn test_nested_publish_from_handler() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = Rc::clone(&bus);
        bus.on(Topic::BasketOpen, move |_event| {
            inner_bus
                .publish(Topic::ModalOpen, Payload::None)
                .map_err(Into::into)
        });
        bus.on(Topic::ModalOpen, record(&log, "modal"));

        bus.publish(Topic::BasketOpen, Payload::None).unwrap();
        assert_eq!(log.borrow().as_slice(), ["modal:modal:open"]);
    }

    #[test]
    fn test_handler_may_subscribe_during_dispatch() {
        let bus = Rc::new(EventBus::new());
        let inner_bus = Rc::clone(&bus);
        bus.on(Topic::ModalOpen, move |_event| {
            inner_bus.on(Topic::ModalClose, |_| Ok(()));
            Ok(())
        });

        bus.publish(Topic::ModalOpen, Payload::None).unwrap();
        assert_eq!(bus.subscription_count(), 2);
    }
}
