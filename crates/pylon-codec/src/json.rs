use crate::error::Result;
use crate::requests::{AddEventRequest, AddSubscriptionRequest, UpdateSubscriptionRequest};
use crate::RequestDecoder;

/// Decoder for `application/json` request bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl RequestDecoder for JsonDecoder {
    fn decode_add_event(&self, bytes: &[u8]) -> Result<AddEventRequest> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn decode_add_subscriptions(&self, bytes: &[u8]) -> Result<Vec<AddSubscriptionRequest>> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn decode_update_subscriptions(&self, bytes: &[u8]) -> Result<Vec<UpdateSubscriptionRequest>> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
