use serde::Serialize;
use std::collections::HashMap;

/// One sampled value reported by a device resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: String,
    /// Epoch milliseconds at which the value was sampled.
    pub origin: i64,
    pub device_name: String,
    pub resource_name: String,
    pub profile_name: String,
    pub value_type: String,
    pub value: String,
}

/// Persisted telemetry record: a set of readings reported together by one
/// device source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub device_name: String,
    pub profile_name: String,
    pub source_name: String,
    /// Epoch milliseconds at which the event was produced on the device.
    pub origin: i64,
    pub readings: Vec<Reading>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}
