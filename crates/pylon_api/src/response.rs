use http::StatusCode;
use pylon_domain::{DomainError, Event, Subscription};
use serde::Serialize;
use tracing::{debug, error};

/// Envelope for outcomes that carry no payload: id echo, optional message,
/// HTTP-equivalent status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub status_code: u16,
}

impl BaseResponse {
    pub fn new(request_id: &str, message: &str, status: StatusCode) -> Self {
        Self {
            request_id: request_id.to_string(),
            message: message.to_string(),
            status_code: status.as_u16(),
        }
    }
}

/// Base envelope plus the identifier of a created resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseWithIdResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub id: String,
}

impl BaseWithIdResponse {
    pub fn new(request_id: &str, message: &str, status: StatusCode, id: &str) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub count: u64,
}

impl CountResponse {
    pub fn new(request_id: &str, message: &str, status: StatusCode, count: u64) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub event: Event,
}

impl EventResponse {
    pub fn new(request_id: &str, message: &str, status: StatusCode, event: Event) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEventsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub events: Vec<Event>,
}

impl MultiEventsResponse {
    pub fn new(request_id: &str, message: &str, status: StatusCode, events: Vec<Event>) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub subscription: Subscription,
}

impl SubscriptionResponse {
    pub fn new(
        request_id: &str,
        message: &str,
        status: StatusCode,
        subscription: Subscription,
    ) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            subscription,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSubscriptionsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub subscriptions: Vec<Subscription>,
}

impl MultiSubscriptionsResponse {
    pub fn new(
        request_id: &str,
        message: &str,
        status: StatusCode,
        subscriptions: Vec<Subscription>,
    ) -> Self {
        Self {
            base: BaseResponse::new(request_id, message, status),
            subscriptions,
        }
    }
}

/// One entry of a multi-status response. Serialized untagged: clients see
/// either a base envelope or a base-with-id envelope per item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchItemResponse {
    WithId(BaseWithIdResponse),
    Base(BaseResponse),
}

impl BatchItemResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            BatchItemResponse::WithId(r) => r.base.status_code,
            BatchItemResponse::Base(r) => r.status_code,
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            BatchItemResponse::WithId(r) => &r.base.request_id,
            BatchItemResponse::Base(r) => &r.request_id,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status_code() < 400
    }
}

/// Exactly one canonical response shape is produced per call outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Base(BaseResponse),
    BaseWithId(BaseWithIdResponse),
    Count(CountResponse),
    Event(EventResponse),
    Events(MultiEventsResponse),
    Subscription(SubscriptionResponse),
    Subscriptions(MultiSubscriptionsResponse),
    Batch(Vec<BatchItemResponse>),
}

impl ApiResponse {
    /// The HTTP-equivalent status the transport should answer with. Batch
    /// responses are always multi-status, whatever the per-item outcomes.
    pub fn status_code(&self) -> StatusCode {
        let raw = match self {
            ApiResponse::Base(r) => r.status_code,
            ApiResponse::BaseWithId(r) => r.base.status_code,
            ApiResponse::Count(r) => r.base.status_code,
            ApiResponse::Event(r) => r.base.status_code,
            ApiResponse::Events(r) => r.base.status_code,
            ApiResponse::Subscription(r) => r.base.status_code,
            ApiResponse::Subscriptions(r) => r.base.status_code,
            ApiResponse::Batch(_) => return StatusCode::MULTI_STATUS,
        };
        StatusCode::from_u16(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Map a domain error to its HTTP-equivalent status code.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) | DomainError::ContractInvalid(_) => StatusCode::BAD_REQUEST,
        DomainError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        DomainError::EventNotFound(_) | DomainError::SubscriptionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DomainError::SubscriptionAlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::Publish(_) | DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the error envelope for a failed call, logging it with the echoed
/// request id.
pub fn error_response(err: &DomainError, request_id: &str) -> BaseResponse {
    error!(error = %err, request_id = %request_id, "request failed");
    debug!(error = ?err, request_id = %request_id, "request failure detail");
    BaseResponse::new(request_id, &err.to_string(), error_status(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_with_id_serializes_flat_camel_case() {
        let response = BaseWithIdResponse::new("req-1", "", StatusCode::CREATED, "ev-1");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"requestId": "req-1", "statusCode": 201, "id": "ev-1"})
        );
    }

    #[test]
    fn test_empty_request_id_and_message_omitted() {
        let response = BaseResponse::new("", "", StatusCode::OK);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 200}));
    }

    #[test]
    fn test_batch_is_always_multi_status() {
        let all_failed = ApiResponse::Batch(vec![BatchItemResponse::Base(BaseResponse::new(
            "",
            "boom",
            StatusCode::INTERNAL_SERVER_ERROR,
        ))]);
        assert_eq!(all_failed.status_code(), StatusCode::MULTI_STATUS);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&DomainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::UnsupportedMediaType("text/plain".into())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            error_status(&DomainError::EventNotFound("ev-1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::Storage(anyhow::anyhow!("io"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
