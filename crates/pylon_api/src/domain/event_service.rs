use pylon_domain::{
    DomainError, DomainResult, Event, EventRepository, EventValidator, QueryWindow,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Domain service for the synchronous half of event ingestion plus every
/// query and purge operation over stored events.
pub struct EventService {
    repository: Arc<dyn EventRepository>,
    validator: Arc<dyn EventValidator>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>, validator: Arc<dyn EventValidator>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    /// Validate and persist one event, returning its id. Validation and
    /// persistence are strictly sequential; the first failure aborts.
    #[instrument(skip(self, event), fields(device_name = %device_name, profile_name = %profile_name, source_name = %source_name))]
    pub async fn add_event(
        &self,
        event: Event,
        profile_name: &str,
        device_name: &str,
        source_name: &str,
    ) -> DomainResult<String> {
        self.validator
            .validate(&event, profile_name, device_name, source_name)
            .await?;

        let id = self.repository.add_event(event).await?;
        debug!(event_id = %id, "persisted event");
        Ok(id)
    }

    pub async fn event_by_id(&self, id: &str) -> DomainResult<Event> {
        self.repository
            .event_by_id(id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(id.to_string()))
    }

    pub async fn delete_event_by_id(&self, id: &str) -> DomainResult<()> {
        self.repository.delete_event_by_id(id).await
    }

    pub async fn event_count(&self) -> DomainResult<u64> {
        self.repository.event_count().await
    }

    pub async fn event_count_by_device_name(&self, device_name: &str) -> DomainResult<u64> {
        self.repository.event_count_by_device_name(device_name).await
    }

    pub async fn all_events(&self, window: &QueryWindow) -> DomainResult<Vec<Event>> {
        self.repository.all_events(window).await
    }

    pub async fn events_by_device_name(
        &self,
        window: &QueryWindow,
        device_name: &str,
    ) -> DomainResult<Vec<Event>> {
        self.repository
            .events_by_device_name(window, device_name)
            .await
    }

    pub async fn events_by_time_range(&self, window: &QueryWindow) -> DomainResult<Vec<Event>> {
        self.repository.events_by_time_range(window).await
    }

    #[instrument(skip(self))]
    pub async fn delete_events_by_device_name(&self, device_name: &str) -> DomainResult<()> {
        self.repository
            .delete_events_by_device_name(device_name)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_events_by_age(&self, age_millis: i64) -> DomainResult<()> {
        self.repository.delete_events_by_age(age_millis).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylon_domain::{MockEventRepository, MockEventValidator};
    use std::collections::HashMap;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            device_name: "device-a".to_string(),
            profile_name: "thermostat".to_string(),
            source_name: "temperature".to_string(),
            origin: 1_700_000_000_000,
            readings: vec![],
            tags: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_add_event_validates_then_persists() {
        let mut repository = MockEventRepository::new();
        let mut validator = MockEventValidator::new();

        validator
            .expect_validate()
            .withf(|event: &Event, profile: &str, device: &str, source: &str| {
                event.id == "ev-1"
                    && profile == "thermostat"
                    && device == "device-a"
                    && source == "temperature"
            })
            .times(1)
            .return_once(|_, _, _, _| Ok(()));

        repository
            .expect_add_event()
            .withf(|event: &Event| event.id == "ev-1")
            .times(1)
            .return_once(|event| Ok(event.id));

        let service = EventService::new(Arc::new(repository), Arc::new(validator));

        let id = service
            .add_event(event("ev-1"), "thermostat", "device-a", "temperature")
            .await
            .unwrap();

        assert_eq!(id, "ev-1");
    }

    #[tokio::test]
    async fn test_add_event_validation_failure_skips_store() {
        let mut repository = MockEventRepository::new();
        let mut validator = MockEventValidator::new();

        validator
            .expect_validate()
            .times(1)
            .return_once(|_, _, _, _| {
                Err(DomainError::Validation(
                    "device name does not match route".to_string(),
                ))
            });
        repository.expect_add_event().times(0);

        let service = EventService::new(Arc::new(repository), Arc::new(validator));

        let err = service
            .add_event(event("ev-1"), "thermostat", "other-device", "temperature")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_event_by_id_maps_missing_to_not_found() {
        let mut repository = MockEventRepository::new();
        repository
            .expect_event_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let service = EventService::new(Arc::new(repository), Arc::new(MockEventValidator::new()));

        let err = service.event_by_id("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::EventNotFound(_)));
    }
}
