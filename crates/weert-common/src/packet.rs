//! Loop packet: a single real-time sensor reading event.
//!
//! Packets arrive from the weather-station engine as a flat map of
//! observation name to numeric value (or null when the sensor produced no
//! reading), plus a `dateTime` epoch-seconds timestamp inline with the
//! fields. The serde representation round-trips that flat form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sensor reading event. Read-only to the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopPacket {
    /// Observation timestamp in epoch seconds.
    #[serde(rename = "dateTime")]
    pub date_time: i64,

    /// Observation fields. `None` means the sensor reported no value.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<f64>>,
}

impl LoopPacket {
    /// Create an empty packet at the given timestamp.
    pub fn new(date_time: i64) -> Self {
        Self {
            date_time,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion, mostly for tests and fixtures.
    pub fn with_field(mut self, name: &str, value: Option<f64>) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Look up a field value. Absent and null fields both yield `None`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied().flatten()
    }

    /// Timestamp in milliseconds (JavaScript style).
    pub fn timestamp_millis(&self) -> i64 {
        self.date_time * 1000
    }

    /// Age of the packet relative to `now` (epoch seconds).
    pub fn age_secs(&self, now: i64) -> i64 {
        now - self.date_time
    }
}
