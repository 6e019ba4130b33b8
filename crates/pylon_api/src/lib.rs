pub mod batch;
pub mod config;
pub mod controller;
pub mod domain;
pub mod response;
pub mod telemetry;

pub use batch::{into_multi_status, BatchOutcome};
pub use config::ServiceConfig;
pub use controller::{EventController, SubscriptionController};
pub use domain::{EventService, SubscriptionService};
pub use response::{
    error_response, error_status, ApiResponse, BaseResponse, BaseWithIdResponse, BatchItemResponse,
    CountResponse, EventResponse, MultiEventsResponse, MultiSubscriptionsResponse,
    SubscriptionResponse,
};
pub use telemetry::init_telemetry;
