pub mod error;
pub mod event;
pub mod in_memory_event_store;
pub mod in_memory_subscription_store;
pub mod publisher;
pub mod query;
pub mod repository;
pub mod subscription;
pub mod validate;
pub mod validator;

pub use error::{DomainError, DomainResult};
pub use event::{Event, Reading};
pub use in_memory_event_store::InMemoryEventStore;
pub use in_memory_subscription_store::InMemorySubscriptionStore;
pub use publisher::RawEventPublisher;
pub use query::QueryWindow;
pub use repository::{EventRepository, SubscriptionRepository};
pub use subscription::{Channel, Subscription, SubscriptionPatch};
pub use validate::validate_struct;
pub use validator::EventValidator;

// Re-export mocks when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use publisher::MockRawEventPublisher;
#[cfg(any(test, feature = "testing"))]
pub use repository::MockEventRepository;
#[cfg(any(test, feature = "testing"))]
pub use repository::MockSubscriptionRepository;
#[cfg(any(test, feature = "testing"))]
pub use validator::MockEventValidator;
