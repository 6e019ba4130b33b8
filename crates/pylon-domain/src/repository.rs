use crate::error::DomainResult;
use crate::event::Event;
use crate::query::QueryWindow;
use crate::subscription::Subscription;
use async_trait::async_trait;

/// Repository trait for event storage operations. The persistence layer
/// implements this trait and is trusted to apply query windows verbatim.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event, returning its id.
    async fn add_event(&self, event: Event) -> DomainResult<String>;

    /// Get an event by id.
    async fn event_by_id(&self, id: &str) -> DomainResult<Option<Event>>;

    /// Delete an event by id. Fails with `EventNotFound` for unknown ids.
    async fn delete_event_by_id(&self, id: &str) -> DomainResult<()>;

    /// List all events within the window, newest origin first.
    async fn all_events(&self, window: &QueryWindow) -> DomainResult<Vec<Event>>;

    /// List events reported by the named device within the window.
    async fn events_by_device_name(
        &self,
        window: &QueryWindow,
        device_name: &str,
    ) -> DomainResult<Vec<Event>>;

    /// List events whose origin falls inside the window's time range.
    async fn events_by_time_range(&self, window: &QueryWindow) -> DomainResult<Vec<Event>>;

    /// Total number of stored events.
    async fn event_count(&self) -> DomainResult<u64>;

    /// Number of stored events reported by the named device.
    async fn event_count_by_device_name(&self, device_name: &str) -> DomainResult<u64>;

    /// Delete all events reported by the named device.
    async fn delete_events_by_device_name(&self, device_name: &str) -> DomainResult<()>;

    /// Delete all events whose origin is older than `age_millis` before now.
    async fn delete_events_by_age(&self, age_millis: i64) -> DomainResult<()>;
}

/// Repository trait for subscription storage operations.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Persist a new subscription, returning its id. Fails with
    /// `SubscriptionAlreadyExists` for duplicate names.
    async fn add_subscription(&self, subscription: Subscription) -> DomainResult<String>;

    /// Get a subscription by name.
    async fn subscription_by_name(&self, name: &str) -> DomainResult<Option<Subscription>>;

    /// List all subscriptions within the window.
    async fn all_subscriptions(&self, window: &QueryWindow) -> DomainResult<Vec<Subscription>>;

    /// List subscriptions carrying the given category.
    async fn subscriptions_by_category(
        &self,
        window: &QueryWindow,
        category: &str,
    ) -> DomainResult<Vec<Subscription>>;

    /// List subscriptions carrying the given label.
    async fn subscriptions_by_label(
        &self,
        window: &QueryWindow,
        label: &str,
    ) -> DomainResult<Vec<Subscription>>;

    /// List subscriptions owned by the given receiver.
    async fn subscriptions_by_receiver(
        &self,
        window: &QueryWindow,
        receiver: &str,
    ) -> DomainResult<Vec<Subscription>>;

    /// Replace a stored subscription with an updated record.
    async fn update_subscription(&self, subscription: Subscription) -> DomainResult<()>;

    /// Delete a subscription by name. Fails with `SubscriptionNotFound`
    /// for unknown names.
    async fn delete_subscription_by_name(&self, name: &str) -> DomainResult<()>;
}
