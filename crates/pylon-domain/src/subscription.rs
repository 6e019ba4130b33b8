use serde::Serialize;

/// Delivery channel for notifications routed through a subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// "REST" or "EMAIL"
    pub channel_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Routing record that maps notification categories/labels to delivery
/// channels for a receiver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub receiver: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub categories: Vec<String>,
    pub labels: Vec<String>,
    pub channels: Vec<Channel>,
    pub resend_limit: i64,
    /// Interval between resend attempts, e.g. "5s". Interpreted by the
    /// notification sender, opaque here.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resend_interval: String,
}

/// Field-wise patch for a stored subscription; `Some` wins over the stored
/// value, `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub name: String,
    pub receiver: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub labels: Option<Vec<String>>,
    pub channels: Option<Vec<Channel>>,
    pub resend_limit: Option<i64>,
    pub resend_interval: Option<String>,
}

impl SubscriptionPatch {
    /// Apply this patch onto a stored subscription.
    pub fn apply(self, mut stored: Subscription) -> Subscription {
        if let Some(receiver) = self.receiver {
            stored.receiver = receiver;
        }
        if let Some(description) = self.description {
            stored.description = description;
        }
        if let Some(categories) = self.categories {
            stored.categories = categories;
        }
        if let Some(labels) = self.labels {
            stored.labels = labels;
        }
        if let Some(channels) = self.channels {
            stored.channels = channels;
        }
        if let Some(resend_limit) = self.resend_limit {
            stored.resend_limit = resend_limit;
        }
        if let Some(resend_interval) = self.resend_interval {
            stored.resend_interval = resend_interval;
        }
        stored
    }
}
