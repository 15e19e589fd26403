use parking_lot::Mutex;
use std::io::Cursor;
use std::sync::Arc;

use crate::tests::*;
use crate::variant::EncodingMask;

#[test]
fn variant_scalars() {
    use std::mem;
    println!(
        "Size of a variant in bytes is {}",
        mem::size_of::<Variant>()
    );

    // Empty
    serialize_test(Variant::Empty);
    // Boolean
    let v = Variant::Boolean(true);
    serialize_test(v);
    // SByte
    let v = Variant::SByte(-44);
    serialize_test(v);
    // Byte
    let v = Variant::Byte(255);
    serialize_test(v);
    // Int16
    let v = Variant::Int16(-20000);
    serialize_test(v);
    // UInt16
    let v = Variant::UInt16(55778);
    serialize_test(v);
    // Int32
    let v = Variant::Int32(-9999999);
    serialize_test(v);
    // UInt32
    let v = Variant::UInt32(24424244);
    serialize_test(v);
    // Int64
    let v = Variant::Int64(-384747424424244);
    serialize_test(v);
    // UInt64
    let v = Variant::UInt64(9384747424422314244);
    serialize_test(v);
    // Float
    let v = Variant::Float(77.33f32);
    serialize_test(v);
    // Double
    let v = Variant::Double(99.123f64);
    serialize_test(v);
    // DateTime
    let v = Variant::from(DateTime::now());
    serialize_test(v);
    // UAString
    let v = Variant::from(UAString::from("Hello Everybody"));
    serialize_test(v);
    // ByteString
    let v = Variant::from(ByteString::from(b"Everything or nothing"));
    serialize_test(v);
    // XmlElement
    let v = Variant::XmlElement(XmlElement::from("The world wonders"));
    serialize_test(v);
    // NodeId
    let v = Variant::from(NodeId::new(99, "hello everyone"));
    serialize_test(v);
    let v: NodeId = ObjectId::ReadRequest_Encoding_DefaultBinary.into();
    let v = Variant::from(v);
    serialize_test(v);
    // ExpandedNodeId
    let v: ExpandedNodeId = ObjectId::ReadRequest_Encoding_DefaultBinary.into();
    let v = Variant::from(v);
    serialize_test(v);
    // StatusCode
    let v = Variant::from(StatusCode::BadResourceUnavailable);
    serialize_test(v);
    // QualifiedName
    let v = Variant::from(QualifiedName {
        namespace_index: 100,
        name: UAString::from("this is a qualified name"),
    });
    serialize_test(v);
    // LocalizedText
    let v = Variant::from(LocalizedText {
        locale: UAString::from("Hello everyone"),
        text: UAString::from("This text is localized"),
    });
    serialize_test(v);
    // ExtensionObject
    let v = Variant::from(ExtensionObject::null());
    serialize_test(v);
    // DataValue
    let v = Variant::from(DataValue {
        value: Some(Variant::Double(1000f64)),
        status: Some(StatusCode::GoodClamped),
        source_timestamp: Some(DateTime::now()),
        source_picoseconds: Some(333),
        server_timestamp: Some(DateTime::now()),
        server_picoseconds: Some(666),
    });
    serialize_test(v);
    // Variant in Variant
    let v = Variant::Variant(Box::new(Variant::from(8u8)));
    serialize_test(v);
    // Diagnostic
    let v = Variant::from(DiagnosticInfo {
        symbolic_id: Some(99),
        namespace_uri: Some(437437),
        locale: Some(333),
        localized_text: Some(233),
        additional_info: Some(UAString::from("Nested diagnostic")),
        inner_status_code: Some(StatusCode::Good),
        inner_diagnostic_info: None,
    });
    serialize_test(v);
}

#[test]
fn variant_single_dimension_array() {
    let values = vec![
        Variant::Int32(100),
        Variant::Int32(200),
        Variant::Int32(300),
    ];
    let v = Variant::from((VariantTypeId::Int32, values));
    serialize_test(v);
}

#[test]
fn variant_multi_dimension_array() {
    let values = vec![
        Variant::Int32(100),
        Variant::Int32(200),
        Variant::Int32(300),
        Variant::Int32(400),
        Variant::Int32(500),
        Variant::Int32(600),
    ];
    let dimensions = vec![3u32, 2u32];
    let v = Variant::from((VariantTypeId::Int32, values, dimensions));
    serialize_test(v);
}

// An Int32 array [1,2,3] is the tag byte with the array bit, an element count of 3 and three
// 4-byte little endian ints.
#[test]
fn variant_int32_array_wire_form() {
    let values = vec![Variant::Int32(1), Variant::Int32(2), Variant::Int32(3)];
    let v = Variant::from((VariantTypeId::Int32, values));
    let expected = [
        0x86, // Int32 = 6, with the array values bit 0x80
        0x03, 0x00, 0x00, 0x00, // element count 3
        0x01, 0x00, 0x00, 0x00, // 1
        0x02, 0x00, 0x00, 0x00, // 2
        0x03, 0x00, 0x00, 0x00, // 3
    ];
    serialize_and_compare(v.clone(), &expected);

    let mut stream = Cursor::new(expected.to_vec());
    let decoded = Variant::decode(&mut stream, &DecodingOptions::test()).unwrap();
    assert_eq!(decoded, v);
}

// test decoding of a null array - null != empty!
#[test]
fn null_array() -> EncodingResult<()> {
    // Currently creating a null array via Array or Variant is not possible so do it by hand
    let vec = Vec::new();
    let mut stream = Cursor::new(vec);
    let mask = EncodingMask::BOOLEAN | EncodingMask::ARRAY_MASK;
    mask.encode(&mut stream)?;
    let length = -1_i32;
    length.encode(&mut stream)?;
    let actual = stream.into_inner();
    let mut stream = Cursor::new(actual);
    let arr = Variant::decode(&mut stream, &DecodingOptions::test())?;
    assert_eq!(
        arr,
        Variant::Array(Box::new(Array {
            value_type: VariantTypeId::Boolean,
            values: Vec::new(),
            dimensions: Vec::new()
        }))
    );
    Ok(())
}

// Dimensions whose product does not match the element count are malformed
#[test]
fn array_dimension_mismatch() {
    let values = vec![
        Variant::Int32(100),
        Variant::Int32(200),
        Variant::Int32(300),
        Variant::Int32(400),
        Variant::Int32(500),
        Variant::Int32(600),
    ];
    let v = Variant::from((VariantTypeId::Int32, values, vec![3u32, 2u32]));
    let mut bytes = v.encode_to_vec();
    // Patch the second dimension from 2 to 4
    let len = bytes.len();
    bytes[len - 4] = 4;
    let mut stream = Cursor::new(bytes);
    assert_eq!(
        Variant::decode(&mut stream, &DecodingOptions::test()).unwrap_err(),
        StatusCode::BadDecodingError
    );
}

// An unknown built-in type tag is malformed
#[test]
fn unknown_encoding_mask() {
    let bytes = [0x3fu8, 0x00];
    let mut stream = Cursor::new(bytes);
    assert_eq!(
        Variant::decode(&mut stream, &DecodingOptions::test()).unwrap_err(),
        StatusCode::BadDecodingError
    );
}

#[test]
fn variant_array_limits() {
    let decoding_options = DecodingOptions::test();
    let count = decoding_options.max_array_length + 1;
    let values = (0..count).map(|i| Variant::Int32(i as i32)).collect::<Vec<_>>();
    let v = Variant::from((VariantTypeId::Int32, values));
    let mut stream = Cursor::new(v.encode_to_vec());
    assert_eq!(
        Variant::decode(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadEncodingLimitsExceeded
    );
}

#[test]
fn deep_encoding() {
    let decoding_options = DecodingOptions {
        decoding_depth_gauge: Arc::new(Mutex::new(DepthGauge {
            max_depth: 2,
            current_depth: 0,
        })),
        ..Default::default()
    };

    let d4 = Variant::from(1);
    let d3 = Variant::Variant(Box::new(d4));
    let d2 = Variant::Variant(Box::new(d3));

    // This should decode
    let mut stream = serialize_as_stream(d2.clone());
    assert_eq!(Variant::decode(&mut stream, &decoding_options).unwrap(), d2);

    // This should not decode, too deep
    let d1 = Variant::Variant(Box::new(d2));
    let mut stream = serialize_as_stream(d1);
    let res = Variant::decode(&mut stream, &decoding_options);
    assert_eq!(res.unwrap_err(), StatusCode::BadDecodingError);
}
