//! Publish/subscribe event broker.
//!
//! Producers and consumers are decoupled through a closed vocabulary of
//! [`Topic`]s rather than ad hoc strings: publishers and subscribers share
//! the same enum at compile time, so a renamed event is a compile error,
//! not a silently dead subscription. One subscription can still cover every
//! field of a form through the [`TopicFilter`] wildcard variants.
//!
//! Dispatch is synchronous and single-threaded. A handler may publish
//! further events, but the mutation → change-event → re-render graph must
//! stay acyclic; the bus does not detect cycles.

mod bus;
mod topic;

pub use bus::{DispatchError, Event, EventBus, HandlerResult, SubscriptionId};
pub use topic::{Payload, Topic, TopicFilter};
