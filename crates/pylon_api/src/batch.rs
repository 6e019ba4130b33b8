use crate::response::{
    error_status, ApiResponse, BaseResponse, BaseWithIdResponse, BatchItemResponse,
};
use http::StatusCode;
use pylon_domain::DomainResult;
use tracing::{debug, error};

/// Outcome of one independent sub-operation of a batch call. `Ok(Some(id))`
/// means a resource was created; `Ok(None)` a payload-less success.
pub struct BatchOutcome {
    pub request_id: String,
    pub result: DomainResult<Option<String>>,
}

/// Assemble per-item outcomes into a multi-status response.
///
/// Result order equals input order; clients correlate by position when no
/// request id was supplied. One item's failure is recorded in its own slot
/// and never affects siblings or the outer status.
pub fn into_multi_status(outcomes: Vec<BatchOutcome>, ok_status: StatusCode) -> ApiResponse {
    let mut items = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let item = match outcome.result {
            Ok(Some(id)) => BatchItemResponse::WithId(BaseWithIdResponse::new(
                &outcome.request_id,
                "",
                StatusCode::CREATED,
                &id,
            )),
            Ok(None) => {
                BatchItemResponse::Base(BaseResponse::new(&outcome.request_id, "", ok_status))
            }
            Err(err) => {
                error!(error = %err, request_id = %outcome.request_id, "batch item failed");
                debug!(error = ?err, request_id = %outcome.request_id, "batch item failure detail");
                BatchItemResponse::Base(BaseResponse::new(
                    &outcome.request_id,
                    &err.to_string(),
                    error_status(&err),
                ))
            }
        };
        items.push(item);
    }
    ApiResponse::Batch(items)
}
