pub mod event;
pub mod subscription;

pub use event::EventController;
pub use subscription::SubscriptionController;
