use pylon_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported content type: \"{0}\"")]
    UnsupportedContentType(String),

    #[error("failed to decode JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode CBOR payload: {0}")]
    Cbor(#[from] serde_cbor::Error),
}

impl From<CodecError> for DomainError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::UnsupportedContentType(ct) => DomainError::UnsupportedMediaType(ct),
            other => DomainError::ContractInvalid(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
