pub mod event_service;
pub mod subscription_service;

pub use event_service::EventService;
pub use subscription_service::SubscriptionService;
