use crate::error::Result;
use crate::requests::{AddEventRequest, AddSubscriptionRequest, UpdateSubscriptionRequest};
use crate::RequestDecoder;

/// Decoder for `application/cbor` request bodies. Device services favor
/// CBOR for binary readings to avoid base64 inflation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborDecoder;

impl CborDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl RequestDecoder for CborDecoder {
    fn decode_add_event(&self, bytes: &[u8]) -> Result<AddEventRequest> {
        Ok(serde_cbor::from_slice(bytes)?)
    }

    fn decode_add_subscriptions(&self, bytes: &[u8]) -> Result<Vec<AddSubscriptionRequest>> {
        Ok(serde_cbor::from_slice(bytes)?)
    }

    fn decode_update_subscriptions(&self, bytes: &[u8]) -> Result<Vec<UpdateSubscriptionRequest>> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}
