//! Measurement body construction from loop packets.
//!
//! The filter table is compiled from configuration once at startup. Applying
//! it to a packet evaluates every expression; any expression whose field is
//! missing from the packet is silently omitted from the result.

use crate::expr::FieldExpr;
use serde::Serialize;
use std::collections::BTreeMap;
use weert_common::{LoopPacket, Result};

/// Compiled filter table: output-field name paired with its expression.
#[derive(Debug, Clone)]
pub struct FilterTable {
    filters: Vec<(String, FieldExpr)>,
}

impl FilterTable {
    /// Compile every expression in the configured table.
    pub fn compile(table: &BTreeMap<String, String>) -> Result<Self> {
        let mut filters = Vec::with_capacity(table.len());
        for (name, expr) in table {
            filters.push((name.clone(), FieldExpr::parse(expr)?));
        }
        Ok(Self { filters })
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluate every filter against a packet. Missing fields are omitted.
    pub fn apply(&self, packet: &LoopPacket) -> BTreeMap<String, f64> {
        self.filters
            .iter()
            .filter_map(|(name, expr)| expr.eval(packet).map(|value| (name.clone(), value)))
            .collect()
    }
}

/// Tag set attached to every posted body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tags {
    pub platform: String,
    pub stream: String,
}

/// JSON body posted to the packets endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementBody {
    pub measurement: String,
    pub tags: Tags,
    /// Millisecond (JavaScript style) epoch timestamp.
    pub timestamp: i64,
    pub fields: BTreeMap<String, f64>,
}

/// Builds measurement bodies for one configured measurement/tag set.
#[derive(Debug, Clone)]
pub struct PacketBuilder {
    measurement: String,
    tags: Tags,
    table: FilterTable,
}

impl PacketBuilder {
    pub fn new(measurement: &str, tags: Tags, table: FilterTable) -> Self {
        Self {
            measurement: measurement.to_string(),
            tags,
            table,
        }
    }

    /// Build the POST body for one loop packet.
    pub fn body(&self, packet: &LoopPacket) -> MeasurementBody {
        MeasurementBody {
            measurement: self.measurement.clone(),
            tags: self.tags.clone(),
            timestamp: packet.timestamp_millis(),
            fields: self.table.apply(packet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_filters;

    fn builder() -> PacketBuilder {
        let table = FilterTable::compile(&default_filters()).unwrap();
        let tags = Tags {
            platform: "Red Barn".to_string(),
            stream: "loop".to_string(),
        };
        PacketBuilder::new("wxpackets", tags, table)
    }

    #[test]
    fn test_absent_field_omitted_others_present() {
        let packet = LoopPacket::new(1458710400)
            .with_field("outTemp", Some(20.5))
            .with_field("barometer", Some(1013.2));
        let body = builder().body(&packet);

        assert_eq!(body.fields.get("outside_temperature"), Some(&20.5));
        assert_eq!(body.fields.get("barometer_pressure"), Some(&1013.2));
        // dewpoint never appeared in the packet
        assert!(!body.fields.contains_key("dewpoint_temperature"));
        assert_eq!(body.fields.len(), 2);
    }

    #[test]
    fn test_null_field_omitted() {
        let packet = LoopPacket::new(0).with_field("windDir", None);
        let body = builder().body(&packet);
        assert!(!body.fields.contains_key("wind_direction"));
    }

    #[test]
    fn test_timestamp_is_milliseconds() {
        let packet = LoopPacket::new(1458710400);
        assert_eq!(builder().body(&packet).timestamp, 1458710400000);
    }

    #[test]
    fn test_body_serializes_with_tags() {
        let packet = LoopPacket::new(1).with_field("outTemp", Some(1.0));
        let json = serde_json::to_value(builder().body(&packet)).unwrap();
        assert_eq!(json["measurement"], "wxpackets");
        assert_eq!(json["tags"]["platform"], "Red Barn");
        assert_eq!(json["tags"]["stream"], "loop");
        assert_eq!(json["fields"]["outside_temperature"], 1.0);
    }

    #[test]
    fn test_bad_expression_fails_compile() {
        let mut table = default_filters();
        table.insert("broken".to_string(), "outTemp %% 2".to_string());
        assert!(FilterTable::compile(&table).is_err());
    }
}
