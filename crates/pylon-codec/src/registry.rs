use crate::cbor::CborDecoder;
use crate::error::{CodecError, Result};
use crate::json::JsonDecoder;
use crate::requests::{AddEventRequest, AddSubscriptionRequest, UpdateSubscriptionRequest};
use crate::RequestDecoder;
use dashmap::DashMap;
use std::sync::Arc;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_CBOR: &str = "application/cbor";

/// Decoder that fails every decode call. Resolved for unrecognized or
/// empty content types so the error is raised at decode time, where it can
/// be attributed to a specific request, rather than at resolution time.
struct UnsupportedDecoder {
    content_type: String,
}

impl RequestDecoder for UnsupportedDecoder {
    fn decode_add_event(&self, _bytes: &[u8]) -> Result<AddEventRequest> {
        Err(CodecError::UnsupportedContentType(self.content_type.clone()))
    }

    fn decode_add_subscriptions(&self, _bytes: &[u8]) -> Result<Vec<AddSubscriptionRequest>> {
        Err(CodecError::UnsupportedContentType(self.content_type.clone()))
    }

    fn decode_update_subscriptions(&self, _bytes: &[u8]) -> Result<Vec<UpdateSubscriptionRequest>> {
        Err(CodecError::UnsupportedContentType(self.content_type.clone()))
    }
}

/// Process-lifetime cache of one decoder per distinct content type seen.
///
/// Lookups share the cached `Arc`; a first-time resolution constructs the
/// decoder and caches it. Two calls racing on a brand-new content type may
/// both construct one; the last insert wins and later calls share it.
/// Decoders are stateless, so no lock is taken around construction.
pub struct DecoderRegistry {
    decoders: DashMap<String, Arc<dyn RequestDecoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self {
            decoders: DashMap::new(),
        }
    }

    /// Resolve the decoder for a declared content type, case-insensitively.
    pub fn resolve(&self, content_type: &str) -> Arc<dyn RequestDecoder> {
        let normalized = content_type.trim().to_ascii_lowercase();
        if let Some(decoder) = self.decoders.get(&normalized) {
            return Arc::clone(decoder.value());
        }
        let decoder = new_decoder(&normalized);
        self.decoders.insert(normalized, Arc::clone(&decoder));
        decoder
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn new_decoder(normalized: &str) -> Arc<dyn RequestDecoder> {
    match normalized {
        CONTENT_TYPE_JSON => Arc::new(JsonDecoder::new()),
        CONTENT_TYPE_CBOR => Arc::new(CborDecoder::new()),
        other => Arc::new(UnsupportedDecoder {
            content_type: other.to_string(),
        }),
    }
}
