use garde::Validate;
use pylon_domain::{Channel, Event, Reading, Subscription, SubscriptionPatch};
use serde::Deserialize;
use std::collections::HashMap;

/// Wire shape of one reading inside an add-event request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDto {
    #[serde(default)]
    #[garde(skip)]
    pub id: Option<String>,
    #[garde(skip)]
    pub origin: i64,
    #[serde(default)]
    #[garde(skip)]
    pub device_name: String,
    #[garde(length(min = 1))]
    pub resource_name: String,
    #[serde(default)]
    #[garde(skip)]
    pub profile_name: String,
    #[garde(length(min = 1))]
    pub value_type: String,
    #[serde(default)]
    #[garde(skip)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(default)]
    #[garde(skip)]
    pub id: Option<String>,
    #[garde(length(min = 1))]
    pub device_name: String,
    #[garde(length(min = 1))]
    pub profile_name: String,
    #[garde(length(min = 1))]
    pub source_name: String,
    #[garde(skip)]
    pub origin: i64,
    #[serde(default)]
    #[garde(dive)]
    pub readings: Vec<ReadingDto>,
    #[serde(default)]
    #[garde(skip)]
    pub tags: HashMap<String, String>,
}

/// A single structured ingestion request. The request id, when supplied,
/// is echoed back in the response and used for nothing else.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddEventRequest {
    #[serde(default)]
    #[garde(skip)]
    pub request_id: Option<String>,
    #[garde(dive)]
    pub event: EventDto,
}

impl AddEventRequest {
    /// Pure conversion to the domain model; never fails on a decoded
    /// request. Missing ids are filled with fresh xids.
    pub fn into_event(self) -> Event {
        let dto = self.event;
        let device_name = dto.device_name;
        let profile_name = dto.profile_name;
        let readings = dto
            .readings
            .into_iter()
            .map(|r| Reading {
                id: r.id.unwrap_or_else(|| xid::new().to_string()),
                origin: r.origin,
                device_name: if r.device_name.is_empty() {
                    device_name.clone()
                } else {
                    r.device_name
                },
                resource_name: r.resource_name,
                profile_name: if r.profile_name.is_empty() {
                    profile_name.clone()
                } else {
                    r.profile_name
                },
                value_type: r.value_type,
                value: r.value,
            })
            .collect();

        Event {
            id: dto.id.unwrap_or_else(|| xid::new().to_string()),
            device_name,
            profile_name,
            source_name: dto.source_name,
            origin: dto.origin,
            readings,
            tags: dto.tags,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDto {
    #[garde(length(min = 1))]
    pub channel_type: String,
    #[serde(default)]
    #[garde(skip)]
    pub recipients: Vec<String>,
    #[serde(default)]
    #[garde(skip)]
    pub url: String,
}

impl ChannelDto {
    fn into_channel(self) -> Channel {
        Channel {
            channel_type: self.channel_type,
            recipients: self.recipients,
            url: self.url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    #[serde(default)]
    #[garde(skip)]
    pub id: Option<String>,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(length(min = 1))]
    pub receiver: String,
    #[serde(default)]
    #[garde(skip)]
    pub description: String,
    #[serde(default)]
    #[garde(skip)]
    pub categories: Vec<String>,
    #[serde(default)]
    #[garde(skip)]
    pub labels: Vec<String>,
    #[serde(default)]
    #[garde(dive)]
    pub channels: Vec<ChannelDto>,
    #[serde(default)]
    #[garde(skip)]
    pub resend_limit: i64,
    #[serde(default)]
    #[garde(skip)]
    pub resend_interval: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSubscriptionRequest {
    #[serde(default)]
    #[garde(skip)]
    pub request_id: Option<String>,
    #[garde(dive)]
    pub subscription: SubscriptionDto,
}

impl AddSubscriptionRequest {
    pub fn into_subscription(self) -> Subscription {
        let dto = self.subscription;
        Subscription {
            id: dto.id.unwrap_or_else(|| xid::new().to_string()),
            name: dto.name,
            receiver: dto.receiver,
            description: dto.description,
            categories: dto.categories,
            labels: dto.labels,
            channels: dto.channels.into_iter().map(ChannelDto::into_channel).collect(),
            resend_limit: dto.resend_limit,
            resend_interval: dto.resend_interval,
        }
    }
}

/// Patch wire shape: absent fields leave the stored subscription untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPatchDto {
    #[garde(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[garde(skip)]
    pub receiver: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub description: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    #[garde(skip)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    #[garde(skip)]
    pub channels: Option<Vec<ChannelDto>>,
    #[serde(default)]
    #[garde(skip)]
    pub resend_limit: Option<i64>,
    #[serde(default)]
    #[garde(skip)]
    pub resend_interval: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    #[garde(skip)]
    pub request_id: Option<String>,
    #[garde(dive)]
    pub subscription: SubscriptionPatchDto,
}

impl UpdateSubscriptionRequest {
    pub fn into_patch(self) -> SubscriptionPatch {
        let dto = self.subscription;
        SubscriptionPatch {
            name: dto.name,
            receiver: dto.receiver,
            description: dto.description,
            categories: dto.categories,
            labels: dto.labels,
            channels: dto
                .channels
                .map(|channels| channels.into_iter().map(ChannelDto::into_channel).collect()),
            resend_limit: dto.resend_limit,
            resend_interval: dto.resend_interval,
        }
    }
}
