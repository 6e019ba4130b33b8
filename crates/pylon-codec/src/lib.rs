pub mod cbor;
pub mod error;
pub mod json;
pub mod registry;
pub mod requests;

pub use cbor::CborDecoder;
pub use error::{CodecError, Result};
pub use json::JsonDecoder;
pub use registry::{DecoderRegistry, CONTENT_TYPE_CBOR, CONTENT_TYPE_JSON};
pub use requests::{
    AddEventRequest, AddSubscriptionRequest, ChannelDto, EventDto, ReadingDto, SubscriptionDto,
    SubscriptionPatchDto, UpdateSubscriptionRequest,
};

/// Trait for decoding a raw request body of a declared content type into
/// typed request DTOs. One implementation exists per content type; all are
/// stateless and cheap to construct.
pub trait RequestDecoder: Send + Sync {
    /// Decode a single add-event request.
    fn decode_add_event(&self, bytes: &[u8]) -> Result<AddEventRequest>;

    /// Decode an ordered batch of add-subscription requests.
    fn decode_add_subscriptions(&self, bytes: &[u8]) -> Result<Vec<AddSubscriptionRequest>>;

    /// Decode an ordered batch of update-subscription requests.
    fn decode_update_subscriptions(&self, bytes: &[u8]) -> Result<Vec<UpdateSubscriptionRequest>>;
}
