use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(String),

    #[error("Subscription already exists: {0}")]
    SubscriptionAlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedMediaType(String),

    #[error("Malformed request payload: {0}")]
    ContractInvalid(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
