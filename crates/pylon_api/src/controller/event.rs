use crate::domain::EventService;
use crate::response::{
    error_response, ApiResponse, BaseResponse, BaseWithIdResponse, CountResponse, EventResponse,
    MultiEventsResponse,
};
use bytes::Bytes;
use http::StatusCode;
use pylon_codec::DecoderRegistry;
use pylon_domain::query::{resolve_age, resolve_time_range, resolve_window};
use pylon_domain::{validate_struct, RawEventPublisher};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Protocol surface for the event endpoints. The transport hands over
/// already-routed arguments: path variables, raw query parameters and the
/// fully read request body.
pub struct EventController {
    decoders: DecoderRegistry,
    service: Arc<EventService>,
    publisher: Arc<dyn RawEventPublisher>,
    max_result_count: i64,
}

impl EventController {
    pub fn new(
        service: Arc<EventService>,
        publisher: Arc<dyn RawEventPublisher>,
        max_result_count: i64,
    ) -> Self {
        Self {
            decoders: DecoderRegistry::new(),
            service,
            publisher,
            max_result_count,
        }
    }

    /// Dual-path ingestion: the raw body bytes are published to the bus on
    /// a detached task while the synchronous path decodes, validates and
    /// persists. The publish outcome never affects the returned envelope;
    /// its failures are logged and swallowed here.
    #[instrument(
        skip(self, body),
        fields(
            content_type = %content_type,
            profile_name = %profile_name,
            device_name = %device_name,
            source_name = %source_name,
            payload_size = body.len(),
        )
    )]
    pub async fn add_event(
        &self,
        content_type: &str,
        body: Bytes,
        profile_name: &str,
        device_name: &str,
        source_name: &str,
    ) -> ApiResponse {
        // Publish the initially encoded payload, not a re-encoding:
        // downstream consumers need the original bytes. Bytes::clone is a
        // refcount bump on the same buffer.
        let publisher = Arc::clone(&self.publisher);
        let payload = body.clone();
        let profile = profile_name.to_string();
        let device = device_name.to_string();
        let source = source_name.to_string();
        tokio::spawn(async move {
            if let Err(err) = publisher.publish(payload, &profile, &device, &source).await {
                error!(error = %err, device_name = %device, "failed to publish raw event payload");
                debug!(error = ?err, device_name = %device, "raw event publish failure detail");
            }
        });

        let decoder = self.decoders.resolve(content_type);
        let request = match decoder.decode_add_event(&body) {
            Ok(request) => request,
            Err(err) => return ApiResponse::Base(error_response(&err.into(), "")),
        };
        let request_id = request.request_id.clone().unwrap_or_default();

        if let Err(err) = validate_struct(&request) {
            return ApiResponse::Base(error_response(&err, &request_id));
        }

        let event = request.into_event();
        match self
            .service
            .add_event(event, profile_name, device_name, source_name)
            .await
        {
            Ok(id) => ApiResponse::BaseWithId(BaseWithIdResponse::new(
                &request_id,
                "",
                StatusCode::CREATED,
                &id,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, &request_id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn event_by_id(&self, id: &str) -> ApiResponse {
        match self.service.event_by_id(id).await {
            Ok(event) => ApiResponse::Event(EventResponse::new("", "", StatusCode::OK, event)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_event_by_id(&self, id: &str) -> ApiResponse {
        match self.service.delete_event_by_id(id).await {
            Ok(()) => ApiResponse::Base(BaseResponse::new("", "", StatusCode::OK)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn event_count(&self) -> ApiResponse {
        match self.service.event_count().await {
            Ok(count) => ApiResponse::Count(CountResponse::new("", "", StatusCode::OK, count)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn event_count_by_device_name(&self, device_name: &str) -> ApiResponse {
        match self.service.event_count_by_device_name(device_name).await {
            Ok(count) => ApiResponse::Count(CountResponse::new("", "", StatusCode::OK, count)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn all_events(&self, offset: Option<&str>, limit: Option<&str>) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.all_events(&window).await {
            Ok(events) => {
                ApiResponse::Events(MultiEventsResponse::new("", "", StatusCode::OK, events))
            }
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn events_by_device_name(
        &self,
        device_name: &str,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.events_by_device_name(&window, device_name).await {
            Ok(events) => {
                ApiResponse::Events(MultiEventsResponse::new("", "", StatusCode::OK, events))
            }
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn events_by_time_range(
        &self,
        start: &str,
        end: &str,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_time_range(start, end, offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.events_by_time_range(&window).await {
            Ok(events) => {
                ApiResponse::Events(MultiEventsResponse::new("", "", StatusCode::OK, events))
            }
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    /// Accepted for asynchronous deletion: the purge is not guaranteed
    /// complete when the call returns.
    #[instrument(skip(self))]
    pub async fn delete_events_by_device_name(&self, device_name: &str) -> ApiResponse {
        match self.service.delete_events_by_device_name(device_name).await {
            Ok(()) => ApiResponse::Base(BaseResponse::new("", "", StatusCode::ACCEPTED)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    /// Accepted for asynchronous deletion, see above.
    #[instrument(skip(self))]
    pub async fn delete_events_by_age(&self, age: &str) -> ApiResponse {
        let age_millis = match resolve_age(age) {
            Ok(age_millis) => age_millis,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.delete_events_by_age(age_millis).await {
            Ok(()) => ApiResponse::Base(BaseResponse::new("", "", StatusCode::ACCEPTED)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pylon_domain::{
        DomainError, DomainResult, MockEventRepository, MockEventValidator,
    };
    use tokio::sync::mpsc;

    /// Forwards every published payload to a channel so tests can await
    /// the detached publish task deterministically.
    struct CapturingPublisher {
        tx: mpsc::UnboundedSender<Bytes>,
        fail: bool,
    }

    #[async_trait]
    impl RawEventPublisher for CapturingPublisher {
        async fn publish(
            &self,
            payload: Bytes,
            _profile_name: &str,
            _device_name: &str,
            _source_name: &str,
        ) -> DomainResult<()> {
            self.tx.send(payload).expect("test channel closed");
            if self.fail {
                Err(DomainError::Publish("bus unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn add_event_body() -> Bytes {
        Bytes::from(
            serde_json::to_vec(&serde_json::json!({
                "requestId": "req-1",
                "event": {
                    "deviceName": "device-a",
                    "profileName": "thermostat",
                    "sourceName": "temperature",
                    "origin": 1_700_000_000_000i64,
                    "readings": [{
                        "origin": 1_700_000_000_000i64,
                        "resourceName": "temperature",
                        "valueType": "Float64",
                        "value": "21.5"
                    }]
                }
            }))
            .unwrap(),
        )
    }

    fn permissive_validator() -> MockEventValidator {
        let mut validator = MockEventValidator::new();
        validator.expect_validate().returning(|_, _, _, _| Ok(()));
        validator
    }

    fn controller_with(
        repository: MockEventRepository,
        validator: MockEventValidator,
        publisher: CapturingPublisher,
    ) -> EventController {
        let service = Arc::new(EventService::new(Arc::new(repository), Arc::new(validator)));
        EventController::new(service, Arc::new(publisher), 100)
    }

    #[tokio::test]
    async fn test_add_event_publishes_exact_original_bytes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository
            .expect_add_event()
            .return_once(|event| Ok(event.id));

        let controller = controller_with(
            repository,
            permissive_validator(),
            CapturingPublisher { tx, fail: false },
        );

        let body = add_event_body();
        let response = controller
            .add_event("application/json", body.clone(), "thermostat", "device-a", "temperature")
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let published = rx.recv().await.expect("publish task never ran");
        assert_eq!(published, body);
    }

    #[tokio::test]
    async fn test_add_event_accepts_cbor_body() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository
            .expect_add_event()
            .return_once(|event| Ok(event.id));

        let controller = controller_with(
            repository,
            permissive_validator(),
            CapturingPublisher { tx, fail: false },
        );

        let body: Bytes = serde_cbor::to_vec(&serde_json::json!({
            "requestId": "req-cbor",
            "event": {
                "deviceName": "device-a",
                "profileName": "thermostat",
                "sourceName": "temperature",
                "origin": 1_700_000_000_000i64,
                "readings": [{
                    "origin": 1_700_000_000_000i64,
                    "resourceName": "temperature",
                    "valueType": "Float64",
                    "value": "21.5"
                }]
            }
        }))
        .unwrap()
        .into();

        let response = controller
            .add_event("application/cbor", body.clone(), "thermostat", "device-a", "temperature")
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        // the bus still sees the CBOR bytes, not a JSON re-encoding
        assert_eq!(rx.recv().await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_add_event_publish_failure_still_created() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository
            .expect_add_event()
            .return_once(|event| Ok(event.id));

        let controller = controller_with(
            repository,
            permissive_validator(),
            CapturingPublisher { tx, fail: true },
        );

        let response = controller
            .add_event("application/json", add_event_body(), "thermostat", "device-a", "temperature")
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let ApiResponse::BaseWithId(created) = response else {
            panic!("expected created envelope");
        };
        assert_eq!(created.base.request_id, "req-1");
        assert!(!created.id.is_empty());

        // the publish sub-path did run, it just failed
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_add_event_unsupported_content_type_is_415() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let controller = controller_with(
            MockEventRepository::new(),
            MockEventValidator::new(),
            CapturingPublisher { tx, fail: false },
        );

        let response = controller
            .add_event("text/plain", add_event_body(), "", "", "")
            .await;

        assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_add_event_malformed_body_is_400() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let controller = controller_with(
            MockEventRepository::new(),
            MockEventValidator::new(),
            CapturingPublisher { tx, fail: false },
        );

        let response = controller
            .add_event("application/json", Bytes::from_static(b"{broken"), "", "", "")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_event_validator_rejection_echoes_request_id() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut validator = MockEventValidator::new();
        validator.expect_validate().return_once(|_, _, _, _| {
            Err(DomainError::Validation("unknown device".to_string()))
        });
        let mut repository = MockEventRepository::new();
        repository.expect_add_event().times(0);

        let controller = controller_with(
            repository,
            validator,
            CapturingPublisher { tx, fail: false },
        );

        let response = controller
            .add_event("application/json", add_event_body(), "thermostat", "device-a", "temperature")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let ApiResponse::Base(base) = response else {
            panic!("expected error envelope");
        };
        assert_eq!(base.request_id, "req-1");
    }

    #[tokio::test]
    async fn test_list_rejects_limit_above_ceiling() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository.expect_all_events().times(0);

        let controller = controller_with(
            repository,
            MockEventValidator::new(),
            CapturingPublisher { tx, fail: false },
        );

        let response = controller.all_events(None, Some("101")).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_by_age_is_accepted() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository
            .expect_delete_events_by_age()
            .withf(|age: &i64| *age == 0)
            .times(1)
            .return_once(|_| Ok(()));

        let controller = controller_with(
            repository,
            MockEventValidator::new(),
            CapturingPublisher { tx, fail: false },
        );

        let response = controller.delete_events_by_age("0").await;
        assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_delete_by_age_negative_is_validation_error() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut repository = MockEventRepository::new();
        repository.expect_delete_events_by_age().times(0);

        let controller = controller_with(
            repository,
            MockEventValidator::new(),
            CapturingPublisher { tx, fail: false },
        );

        let response = controller.delete_events_by_age("-5").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
