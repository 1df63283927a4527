//! Unit tests for packet intake, projection and statistics.


use crate::adapter_registry::domain::AdapterId;
use crate::packet::domain::{DataPacket, DataType, PacketId, parse_packet_timestamp};
use serde_json::{Map, Value};

/// Builds a packet from raw parts, panicking on invalid test input.
fn packet(id: &str, data_type: DataType, content: Value, timestamp: &str) -> DataPacket {
    let fields: Map<String, Value> = match content {
        Value::Object(map) => map,
        other => panic!("packet content must be an object, got {other}"),
    };
    DataPacket::new(
        PacketId::new(id).expect("valid packet id"),
        AdapterId::new("m1").expect("valid adapter id"),
        data_type,
        fields,
        parse_packet_timestamp(timestamp).expect("valid timestamp"),
    )
}
