use std::io::Cursor;
use std::sync::Arc;

use crate::service_types::*;
use crate::tests::*;

fn service_registry() -> Arc<EncodeableRegistry> {
    let mut registry = EncodeableRegistry::new();
    crate::service_types::register_service_types(&mut registry);
    Arc::new(registry)
}

fn registry_options() -> DecodingOptions {
    DecodingOptions::test().with_registry(service_registry())
}

fn sample_read_request() -> ReadRequest {
    ReadRequest {
        request_header: RequestHeader::dummy(),
        max_age: 500.0,
        timestamps_to_return: TimestampsToReturn::Both,
        nodes_to_read: Some(vec![
            ReadValueId {
                node_id: NodeId::new(2, "pump/speed"),
                attribute_id: 13,
                index_range: UAString::null(),
                data_encoding: QualifiedName::null(),
            },
            ReadValueId::default(),
        ]),
    }
}

#[test]
fn resolve_by_encoding_id() {
    let registry = service_registry();
    // Both encoding ids of a registered type resolve to the same entry
    let entry = registry
        .resolve(&ObjectId::ReadRequest_Encoding_DefaultBinary.into())
        .unwrap();
    assert_eq!(
        entry.ids().data_type_id,
        ExpandedNodeId::from(DataTypeId::ReadRequest)
    );
    let entry = registry
        .resolve(&ObjectId::ReadRequest_Encoding_DefaultXml.into())
        .unwrap();
    assert_eq!(
        entry.ids().data_type_id,
        ExpandedNodeId::from(DataTypeId::ReadRequest)
    );
    // An unknown id resolves to nothing, which is not an error at this level
    assert!(registry
        .resolve(&ExpandedNodeId::new(NodeId::new(0, 59999u32)))
        .is_none());
}

#[test]
fn resolve_by_type() {
    let registry = service_registry();
    let entry = registry
        .resolve_type_id(std::any::TypeId::of::<ServiceFault>())
        .unwrap();
    assert_eq!(
        entry.ids().binary_encoding_id,
        ExpandedNodeId::from(ObjectId::ServiceFault_Encoding_DefaultBinary)
    );
    assert!(registry
        .resolve_type_id(std::any::TypeId::of::<RequestHeader>())
        .is_none());
}

#[test]
fn registry_entry_round_trip() {
    // Drive the dispatch record directly - calc, write, read
    let registry = service_registry();
    let entry = registry
        .resolve(&ObjectId::DataChangeFilter_Encoding_DefaultBinary.into())
        .unwrap();

    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::StatusValue,
        deadband_type: 1,
        deadband_value: 0.5,
    };
    let size = entry.calc_size(&filter).unwrap();
    assert_eq!(size, filter.byte_len());

    let mut stream = Cursor::new(Vec::with_capacity(size));
    assert_eq!(entry.write(&filter, &mut stream).unwrap(), size);
    let bytes = stream.into_inner();
    assert_eq!(bytes.len(), size);

    let mut stream = Cursor::new(bytes);
    let decoded = entry
        .decode(&mut stream, &DecodingOptions::test())
        .unwrap();
    assert!(decoded.eq_box(&filter));

    // The writer refuses a value of the wrong concrete type
    let mut stream = Cursor::new(Vec::new());
    assert_eq!(
        entry
            .write(&MonitoringFilter::default(), &mut stream)
            .unwrap_err(),
        StatusCode::BadEncodingError
    );
}

mod two_registries {
    use super::*;
    use std::io::{Read, Write};

    // Two distinct types that claim the same binary encoding id, to prove that a composed
    // lookup resolves in registration order, first match wins.
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct ShadowA {}

    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct ShadowB {}

    const SHADOW_ENCODING_ID: u32 = 777;

    impl MessageInfo for ShadowA {
        fn data_type_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, 700u32))
        }
        fn binary_encoding_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, SHADOW_ENCODING_ID))
        }
        fn xml_encoding_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, 778u32))
        }
    }

    impl BinaryEncoder<ShadowA> for ShadowA {
        fn byte_len(&self) -> usize {
            0
        }
        fn encode<S: Write>(&self, _stream: &mut S) -> EncodingResult<usize> {
            Ok(0)
        }
        fn decode<S: Read>(_stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
            Ok(ShadowA {})
        }
    }

    impl MessageInfo for ShadowB {
        fn data_type_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, 701u32))
        }
        fn binary_encoding_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, SHADOW_ENCODING_ID))
        }
        fn xml_encoding_id() -> ExpandedNodeId {
            ExpandedNodeId::new(NodeId::new(2, 779u32))
        }
    }

    impl BinaryEncoder<ShadowB> for ShadowB {
        fn byte_len(&self) -> usize {
            0
        }
        fn encode<S: Write>(&self, _stream: &mut S) -> EncodingResult<usize> {
            Ok(0)
        }
        fn decode<S: Read>(_stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
            Ok(ShadowB {})
        }
    }

    #[test]
    fn first_match_wins() {
        let mut first = EncodeableRegistry::new();
        first.register::<ShadowA>();
        let mut second = EncodeableRegistry::new();
        second.register::<ShadowB>();

        let mut set = RegistrySet::new();
        set.add_registry(Arc::new(first));
        set.add_registry(Arc::new(second));

        let id = ExpandedNodeId::new(NodeId::new(2, SHADOW_ENCODING_ID));
        let entry = set.resolve(&id).unwrap();
        assert_eq!(
            entry.ids().data_type_id,
            ExpandedNodeId::new(NodeId::new(2, 700u32))
        );

        // Entries only one child knows about resolve through the set too
        assert!(set
            .resolve(&ExpandedNodeId::new(NodeId::new(2, 779u32)))
            .is_some());
        assert!(set
            .resolve(&ExpandedNodeId::new(NodeId::new(2, 60000u32)))
            .is_none());
    }
}

#[test]
fn message_codec_round_trip() {
    let codec = MessageCodec::new(service_registry(), DecodingOptions::test());
    let request = sample_read_request();

    let bytes = codec.encode_message_to_vec(&request).unwrap();
    let mut stream = Cursor::new(bytes);
    let decoded = codec.decode_message(&mut stream).unwrap();
    let decoded = decoded.as_any().downcast_ref::<ReadRequest>().unwrap();
    assert_eq!(*decoded, request);
}

#[test]
fn message_codec_unknown_type_id() {
    // A message decode commits to a concrete type, an unknown id is a hard error
    let codec = MessageCodec::new(service_registry(), DecodingOptions::test());
    let mut stream = Cursor::new(Vec::new());
    let id = ExpandedNodeId::new(NodeId::new(0, 59999u32));
    id.encode(&mut stream).unwrap();
    let mut stream = Cursor::new(stream.into_inner());
    assert_eq!(
        codec.decode_message(&mut stream).unwrap_err(),
        StatusCode::BadDataTypeIdUnknown
    );
}

#[test]
fn message_codec_max_message_size() {
    let decoding_options = DecodingOptions {
        max_message_size: 8,
        ..DecodingOptions::test()
    };
    let codec = MessageCodec::new(service_registry(), decoding_options);
    assert_eq!(
        codec.encode_message_to_vec(&sample_read_request()).unwrap_err(),
        StatusCode::BadEncodingLimitsExceeded
    );
}

#[test]
fn extension_object_known_type() {
    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::StatusValueTimestamp,
        deadband_type: 0,
        deadband_value: 0.0,
    };
    let eo = ExtensionObject::from_encodable(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        &filter,
    );
    // The measured size feeds the length prefix - node id (4 byte form), kind byte, i32 length,
    // then the filter itself
    assert_eq!(eo.byte_len(), 4 + 1 + 4 + filter.byte_len());

    let decoding_options = registry_options();
    let mut stream = Cursor::new(eo.encode_to_vec());
    let decoded = ExtensionObject::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(decoded, eo);
    assert_eq!(decoded.decoded_as::<DataChangeFilter>(), Some(&filter));

    // The concrete, mandatory decode succeeds too
    assert_eq!(
        decoded.decode_inner::<DataChangeFilter>(&decoding_options).unwrap(),
        filter
    );
}

#[test]
fn extension_object_zero_field_type() {
    // A base type with no fields has a zero length body yet round trips through the registry
    let filter = MonitoringFilter::default();
    let eo = ExtensionObject::from_encodable(
        ObjectId::MonitoringFilter_Encoding_DefaultBinary,
        &filter,
    );
    let bytes = eo.encode_to_vec();
    // Body length prefix is zero
    assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x00, 0x00, 0x00]);

    let decoding_options = registry_options();
    let mut stream = Cursor::new(bytes);
    let decoded = ExtensionObject::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(decoded.decoded_as::<MonitoringFilter>(), Some(&filter));
}

#[test]
fn extension_object_unknown_id_is_opaque() {
    // An unknown encoding id decodes to the raw bytes and original id rather than failing, and
    // re-encodes byte for byte, so unknown types pass through intact
    let body = ByteString::from(&[0x1u8, 0x2, 0x3, 0x4]);
    let id = ExpandedNodeId::new(NodeId::new(0, 59999u32));
    let eo = ExtensionObject::from_byte_string(id.clone(), body.clone());
    let bytes = eo.encode_to_vec();

    let decoding_options = registry_options();
    let mut stream = Cursor::new(bytes.clone());
    let decoded = ExtensionObject::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(decoded.node_id, id);
    assert_eq!(decoded.body, ExtensionObjectBody::ByteString(body));
    assert_eq!(decoded.encode_to_vec(), bytes);
}

#[test]
fn extension_object_under_read() {
    // A body longer than the registered type's encoding would desynchronize the stream
    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::Status,
        deadband_type: 0,
        deadband_value: 0.0,
    };
    let mut body = filter.encode_to_vec();
    body.push(0xde);
    let eo = ExtensionObject::from_byte_string(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        ByteString::from(body),
    );

    let decoding_options = registry_options();
    let mut stream = Cursor::new(eo.encode_to_vec());
    assert_eq!(
        ExtensionObject::decode(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadDecodingError
    );
}

#[test]
fn extension_object_without_registry_stays_opaque() {
    // No registry attached - even a well known id keeps its raw body
    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::Status,
        deadband_type: 0,
        deadband_value: 0.0,
    };
    let eo = ExtensionObject::from_encodable(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        &filter,
    );
    let decoding_options = DecodingOptions::test();
    let mut stream = Cursor::new(eo.encode_to_vec());
    let decoded = ExtensionObject::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(
        decoded.body,
        ExtensionObjectBody::ByteString(ByteString::from(filter.encode_to_vec()))
    );
    // The mandatory typed decode still works against the opaque body
    assert_eq!(
        decoded.decode_inner::<DataChangeFilter>(&decoding_options).unwrap(),
        filter
    );
}

#[test]
fn variant_carries_decoded_extension_object() {
    // Structured values inside a variant travel as extension objects and resolve through the
    // same registry
    let filter = DataChangeFilter {
        trigger: DataChangeTrigger::StatusValue,
        deadband_type: 2,
        deadband_value: 12.5,
    };
    let v = Variant::from(ExtensionObject::from_encodable(
        ObjectId::DataChangeFilter_Encoding_DefaultBinary,
        &filter,
    ));
    let decoding_options = registry_options();
    let mut stream = Cursor::new(v.encode_to_vec());
    let decoded = Variant::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(decoded, v);
}

#[test]
fn service_fault_round_trip() {
    let codec = MessageCodec::new(service_registry(), DecodingOptions::test());
    let fault = ServiceFault::new(&RequestHeader::dummy(), StatusCode::BadServiceUnsupported);
    let bytes = codec.encode_message_to_vec(&fault).unwrap();
    let mut stream = Cursor::new(bytes);
    let decoded = codec.decode_message(&mut stream).unwrap();
    let decoded = decoded.as_any().downcast_ref::<ServiceFault>().unwrap();
    assert_eq!(*decoded, fault);
    assert_eq!(
        decoded.response_header.service_result,
        StatusCode::BadServiceUnsupported
    );
}

#[test]
fn read_response_round_trip() {
    let codec = MessageCodec::new(service_registry(), DecodingOptions::test());
    let response = ReadResponse {
        response_header: ResponseHeader::null(),
        results: Some(vec![
            DataValue::from(Variant::Int32(26)),
            DataValue {
                value: Some(Variant::from("running")),
                status: Some(StatusCode::GoodClamped),
                source_timestamp: Some(DateTime::now()),
                source_picoseconds: None,
                server_timestamp: None,
                server_picoseconds: None,
            },
        ]),
        diagnostic_infos: None,
    };
    let bytes = codec.encode_message_to_vec(&response).unwrap();
    let mut stream = Cursor::new(bytes);
    let decoded = codec.decode_message(&mut stream).unwrap();
    let decoded = decoded.as_any().downcast_ref::<ReadResponse>().unwrap();
    assert_eq!(*decoded, response);
}

#[test]
fn timestamps_to_return() {
    serialize_test(TimestampsToReturn::Source);
    serialize_test(TimestampsToReturn::Neither);

    // An out of range value is malformed
    let mut stream = Cursor::new(vec![0x09u8, 0x00, 0x00, 0x00]);
    assert_eq!(
        TimestampsToReturn::decode(&mut stream, &DecodingOptions::test()).unwrap_err(),
        StatusCode::BadDecodingError
    );
}
