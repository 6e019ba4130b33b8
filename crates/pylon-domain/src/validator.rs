use crate::error::DomainResult;
use crate::event::Event;
use async_trait::async_trait;

/// Business-rule validator consulted before an event is persisted.
///
/// Checks the event against the device profile referenced by the path
/// scope identifiers (all three may be empty depending on the route).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventValidator: Send + Sync {
    async fn validate(
        &self,
        event: &Event,
        profile_name: &str,
        device_name: &str,
        source_name: &str,
    ) -> DomainResult<()>;
}
