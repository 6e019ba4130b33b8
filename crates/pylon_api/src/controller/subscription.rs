use crate::batch::{into_multi_status, BatchOutcome};
use crate::domain::SubscriptionService;
use crate::response::{
    error_response, ApiResponse, BaseResponse, MultiSubscriptionsResponse, SubscriptionResponse,
};
use http::StatusCode;
use pylon_codec::DecoderRegistry;
use pylon_domain::query::resolve_window;
use pylon_domain::validate_struct;
use std::sync::Arc;
use tracing::instrument;

/// Protocol surface for the subscription endpoints. Add and patch are
/// batch calls: one body carries N independent sub-requests and the
/// response is always multi-status.
pub struct SubscriptionController {
    decoders: DecoderRegistry,
    service: Arc<SubscriptionService>,
    max_result_count: i64,
}

impl SubscriptionController {
    pub fn new(service: Arc<SubscriptionService>, max_result_count: i64) -> Self {
        Self {
            decoders: DecoderRegistry::new(),
            service,
            max_result_count,
        }
    }

    #[instrument(skip(self, body), fields(content_type = %content_type, payload_size = body.len()))]
    pub async fn add_subscriptions(&self, content_type: &str, body: &[u8]) -> ApiResponse {
        let decoder = self.decoders.resolve(content_type);
        let requests = match decoder.decode_add_subscriptions(body) {
            Ok(requests) => requests,
            Err(err) => return ApiResponse::Base(error_response(&err.into(), "")),
        };

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let request_id = request.request_id.clone().unwrap_or_default();
            let result = match validate_struct(&request) {
                Ok(()) => self
                    .service
                    .add_subscription(request.into_subscription())
                    .await
                    .map(Some),
                Err(err) => Err(err),
            };
            outcomes.push(BatchOutcome { request_id, result });
        }
        into_multi_status(outcomes, StatusCode::OK)
    }

    #[instrument(skip(self, body), fields(content_type = %content_type, payload_size = body.len()))]
    pub async fn patch_subscriptions(&self, content_type: &str, body: &[u8]) -> ApiResponse {
        let decoder = self.decoders.resolve(content_type);
        let requests = match decoder.decode_update_subscriptions(body) {
            Ok(requests) => requests,
            Err(err) => return ApiResponse::Base(error_response(&err.into(), "")),
        };

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let request_id = request.request_id.clone().unwrap_or_default();
            let result = match validate_struct(&request) {
                Ok(()) => self
                    .service
                    .patch_subscription(request.into_patch())
                    .await
                    .map(|_| None),
                Err(err) => Err(err),
            };
            outcomes.push(BatchOutcome { request_id, result });
        }
        into_multi_status(outcomes, StatusCode::OK)
    }

    #[instrument(skip(self))]
    pub async fn all_subscriptions(
        &self,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.all_subscriptions(&window).await {
            Ok(subscriptions) => ApiResponse::Subscriptions(MultiSubscriptionsResponse::new(
                "",
                "",
                StatusCode::OK,
                subscriptions,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn subscription_by_name(&self, name: &str) -> ApiResponse {
        match self.service.subscription_by_name(name).await {
            Ok(subscription) => ApiResponse::Subscription(SubscriptionResponse::new(
                "",
                "",
                StatusCode::OK,
                subscription,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn subscriptions_by_category(
        &self,
        category: &str,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self
            .service
            .subscriptions_by_category(&window, category)
            .await
        {
            Ok(subscriptions) => ApiResponse::Subscriptions(MultiSubscriptionsResponse::new(
                "",
                "",
                StatusCode::OK,
                subscriptions,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn subscriptions_by_label(
        &self,
        label: &str,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self.service.subscriptions_by_label(&window, label).await {
            Ok(subscriptions) => ApiResponse::Subscriptions(MultiSubscriptionsResponse::new(
                "",
                "",
                StatusCode::OK,
                subscriptions,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn subscriptions_by_receiver(
        &self,
        receiver: &str,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> ApiResponse {
        let window = match resolve_window(offset, limit, self.max_result_count) {
            Ok(window) => window,
            Err(err) => return ApiResponse::Base(error_response(&err, "")),
        };
        match self
            .service
            .subscriptions_by_receiver(&window, receiver)
            .await
        {
            Ok(subscriptions) => ApiResponse::Subscriptions(MultiSubscriptionsResponse::new(
                "",
                "",
                StatusCode::OK,
                subscriptions,
            )),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_subscription_by_name(&self, name: &str) -> ApiResponse {
        match self.service.delete_subscription_by_name(name).await {
            Ok(()) => ApiResponse::Base(BaseResponse::new("", "", StatusCode::OK)),
            Err(err) => ApiResponse::Base(error_response(&err, "")),
        }
    }
}
