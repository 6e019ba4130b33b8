use crate::error::DomainResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Message-bus producer for raw event payloads.
///
/// The payload is published exactly as it was read from the request body,
/// byte for byte, so downstream consumers receive the original encoding
/// without a re-encode round trip. Callers treat the publish as
/// fire-and-forget: errors are logged, never surfaced to the client.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RawEventPublisher: Send + Sync {
    async fn publish(
        &self,
        payload: Bytes,
        profile_name: &str,
        device_name: &str,
        source_name: &str,
    ) -> DomainResult<()>;
}
