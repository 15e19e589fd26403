use serde_json::json;

use crate::service_types::{DataChangeFilter, DataChangeTrigger};
use crate::tests::*;

fn serde_round_trip<T>(value: T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + std::fmt::Debug + PartialEq,
{
    let json = serde_json::to_string(&value).unwrap();
    println!("json = {}", json);
    let decoded = serde_json::from_str::<T>(&json).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn serde_node_id() {
    serde_round_trip(NodeId::null());
    serde_round_trip(NodeId::new(10, "Hello"));
    serde_round_trip(NodeId::new(1, ByteString::from(&[0x1, 0x2])));
}

#[test]
fn serde_status_code() {
    let json = serde_json::to_value(StatusCode::BadDecodingError).unwrap();
    assert_eq!(json, json!(0x8007_0000u32));
    serde_round_trip(StatusCode::BadEncodingLimitsExceeded);
}

#[test]
fn serde_variant() {
    serde_round_trip(Variant::Empty);
    serde_round_trip(Variant::from(3.5f64));
    serde_round_trip(Variant::from(UAString::from("variant")));
    serde_round_trip(Variant::from(NodeId::new(4, 1000u32)));
}

#[test]
fn serde_data_value() {
    serde_round_trip(DataValue {
        value: Some(Variant::Int32(-5)),
        status: Some(StatusCode::Good),
        source_timestamp: Some(DateTime::epoch()),
        source_picoseconds: Some(100),
        server_timestamp: None,
        server_picoseconds: None,
    });
}

#[test]
fn serde_extension_object_decoded_body_is_opaque() {
    // The named-field serialization carries the opaque form - a decoded body serializes as the
    // byte string it encodes to
    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::Status,
        deadband_type: 0,
        deadband_value: 0.0,
    };
    let decoded_form = ExtensionObject::from_encodable(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        &filter,
    );
    let opaque_form = ExtensionObject::from_byte_string(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        ByteString::from(filter.encode_to_vec()),
    );
    assert_eq!(
        serde_json::to_string(&decoded_form).unwrap(),
        serde_json::to_string(&opaque_form).unwrap()
    );
    serde_round_trip(opaque_form);
}
