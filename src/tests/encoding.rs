use parking_lot::Mutex;
use std::sync::Arc;
use std::{io::Cursor, str::FromStr};

use crate::tests::*;

#[test]
fn encoding_bool() {
    serialize_test(true);
    serialize_test(false);
}

#[test]
fn encoding_sbyte() {
    serialize_test(0 as i8);
    serialize_test(100 as i8);
    serialize_test(-90 as i8);
}

#[test]
fn encoding_byte() {
    serialize_test(0 as u8);
    serialize_test(255 as u8);
    serialize_test(90 as u8);
}

#[test]
fn encoding_int16() {
    serialize_test(0 as i16);
    serialize_test(-17000 as i16);
    serialize_test(32000 as i16);
}

#[test]
fn encoding_uint16() {
    serialize_test(0 as u16);
    serialize_test(57000 as u16);
    serialize_test(32000 as u16);
}

#[test]
fn encoding_int32() {
    serialize_test(0 as i32);
    serialize_test(-17444000 as i32);
    serialize_test(32004440 as i32);
}

#[test]
fn encoding_uint32() {
    serialize_test(0 as u32);
    serialize_test(57055500 as u32);
    serialize_test(32555000 as u32);
}

#[test]
fn encoding_int64() {
    serialize_test(0 as i64);
    serialize_test(-17442224000 as i64);
    serialize_test(32022204440 as i64);
}

#[test]
fn encoding_uint64() {
    serialize_test(0 as u64);
    serialize_test(57054445500 as u64);
    serialize_test(34442555000 as u64);
}

#[test]
fn encoding_f32() {
    serialize_test(0 as f32);
    serialize_test(12.4342 as f32);
    serialize_test(5686.222 as f32);
}

#[test]
fn encoding_f64() {
    serialize_test(0 as f64);
    serialize_test(12.43424324234 as f64);
    serialize_test(5686.222342342 as f64);
}

#[test]
fn encoding_string() {
    // Null
    serialize_test(UAString::null());
    // UTF-8 strings
    serialize_test(UAString::from(""));
    serialize_test(UAString::from("ショッピング"));
    serialize_test(UAString::from("This is a test"));
}

#[test]
fn encode_string_part_6_5224() {
    // Sample from OPCUA Part 6 - 5.2.2.4
    let expected = [0x06, 0x00, 0x00, 0x00, 0xE6, 0xB0, 0xB4, 0x42, 0x6F, 0x79];
    let input = UAString::from("水Boy");
    serialize_and_compare(input, &expected);
}

// A null string and an empty string are different things on the wire - length -1 vs length 0
#[test]
fn null_string_vs_empty_string() {
    serialize_and_compare(UAString::null(), &[0xff, 0xff, 0xff, 0xff]);
    serialize_and_compare(UAString::from(""), &[0x00, 0x00, 0x00, 0x00]);

    let decoding_options = DecodingOptions::test();
    let mut stream = Cursor::new(vec![0xffu8, 0xff, 0xff, 0xff]);
    assert!(UAString::decode(&mut stream, &decoding_options)
        .unwrap()
        .is_null());
    let mut stream = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x00]);
    let s = UAString::decode(&mut stream, &decoding_options).unwrap();
    assert!(!s.is_null());
    assert!(s.is_empty());
}

#[test]
fn decode_string_malformed_utf8() {
    // Test that string returns a decoding error when it receives some malformed UTF-8
    // Bytes below are a mangled 水Boy, missing a byte
    let bytes = [0x06, 0x00, 0x00, 0xE6, 0xB0, 0xB4, 0x42, 0x6F, 0x79];
    let mut stream = Cursor::new(bytes);
    let decoding_options = DecodingOptions::test();
    assert_eq!(
        UAString::decode(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadDecodingError
    );
}

#[test]
fn string_limits() {
    let decoding_options = DecodingOptions::test();

    // At the limit decodes fine
    let s = UAString::from("x".repeat(decoding_options.max_string_length));
    let mut stream = Cursor::new(s.encode_to_vec());
    assert_eq!(UAString::decode(&mut stream, &decoding_options).unwrap(), s);

    // One byte past the limit is an encoding limits violation, not a plain decoding error
    let s = UAString::from("x".repeat(decoding_options.max_string_length + 1));
    let mut stream = Cursor::new(s.encode_to_vec());
    assert_eq!(
        UAString::decode(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadEncodingLimitsExceeded
    );
}

#[test]
fn byte_string_limits() {
    let decoding_options = DecodingOptions::test();

    let b = ByteString::from(vec![0xffu8; decoding_options.max_byte_string_length]);
    let mut stream = Cursor::new(b.encode_to_vec());
    assert_eq!(
        ByteString::decode(&mut stream, &decoding_options).unwrap(),
        b
    );

    let b = ByteString::from(vec![0xffu8; decoding_options.max_byte_string_length + 1]);
    let mut stream = Cursor::new(b.encode_to_vec());
    assert_eq!(
        ByteString::decode(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadEncodingLimitsExceeded
    );
}

#[test]
fn array_limits() {
    let decoding_options = DecodingOptions::test();

    let values = Some(vec![0u32; decoding_options.max_array_length]);
    let mut stream = Cursor::new(Vec::new());
    write_array(&mut stream, &values).unwrap();
    let mut stream = Cursor::new(stream.into_inner());
    assert_eq!(
        read_array::<_, u32>(&mut stream, &decoding_options).unwrap(),
        values
    );

    let values = Some(vec![0u32; decoding_options.max_array_length + 1]);
    let mut stream = Cursor::new(Vec::new());
    write_array(&mut stream, &values).unwrap();
    let mut stream = Cursor::new(stream.into_inner());
    assert_eq!(
        read_array::<_, u32>(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadEncodingLimitsExceeded
    );
}

// test decoding of a null array - null != empty!
#[test]
fn null_array_vs_empty_array() {
    let decoding_options = DecodingOptions::test();

    let mut stream = Cursor::new(Vec::new());
    let values: Option<Vec<u32>> = None;
    write_array(&mut stream, &values).unwrap();
    assert_eq!(stream.get_ref().as_slice(), &[0xff, 0xff, 0xff, 0xff]);
    let mut stream = Cursor::new(stream.into_inner());
    assert!(read_array::<_, u32>(&mut stream, &decoding_options)
        .unwrap()
        .is_none());

    let mut stream = Cursor::new(Vec::new());
    let values: Option<Vec<u32>> = Some(Vec::new());
    write_array(&mut stream, &values).unwrap();
    assert_eq!(stream.get_ref().as_slice(), &[0x00, 0x00, 0x00, 0x00]);
    let mut stream = Cursor::new(stream.into_inner());
    let decoded = read_array::<_, u32>(&mut stream, &decoding_options).unwrap();
    assert!(decoded.is_some());
    assert!(decoded.unwrap().is_empty());
}

#[test]
fn negative_array_length() {
    // Any negative length other than the null sentinel is malformed
    let decoding_options = DecodingOptions::test();
    let mut stream = Cursor::new(vec![0xfeu8, 0xff, 0xff, 0xff]);
    assert_eq!(
        read_array::<_, u32>(&mut stream, &decoding_options).unwrap_err(),
        StatusCode::BadDecodingError
    );
}

#[test]
fn encoding_datetime() {
    let now = DateTime::now();
    serialize_test(now);

    let epoch = DateTime::epoch();
    serialize_test(epoch);

    let endtimes = DateTime::endtimes();
    serialize_test(endtimes);

    // serialize a date below Jan 1 1601 ensure it decodes as epoch
    let before_epoch = DateTime::ymd_hms(1599, 1, 1, 0, 0, 0);
    serialize_test_expected(before_epoch, DateTime::epoch());

    // serialize a date after Dec 31 9999 ensure it decodes as endtimes
    let after_endtimes = DateTime::ymd_hms(10000, 1, 1, 0, 0, 0);
    serialize_test_expected(after_endtimes, DateTime::endtimes());
}

#[test]
fn encoding_guid() {
    let guid = Guid::from_str("F0001234-FACE-BEEF-0102-030405060708").unwrap();
    assert_eq!(
        "f0001234-face-beef-0102-030405060708",
        format!("{:?}", guid)
    );
    let new_guid = serialize_test_and_return(guid.clone());
    assert_eq!(
        "f0001234-face-beef-0102-030405060708",
        format!("{:?}", new_guid)
    );
    serialize_test(guid);
}

#[test]
fn encoding_byte_string() {
    serialize_test(ByteString::null());
    serialize_test(ByteString::from(&[0x1, 0x2, 0x3, 0x4]));
}

#[test]
fn encoding_status_code() {
    serialize_test(StatusCode::Good);
    serialize_test(StatusCode::BadDecodingError);
    serialize_test(StatusCode::UncertainLastUsableValue);
}

#[test]
fn encoding_node_id() {
    // 2 byte form
    serialize_test(NodeId::new(0, 72u32));
    // 4 byte form
    serialize_test(NodeId::new(5, 1025u32));
    // full numeric form
    serialize_test(NodeId::new(5000, 80000u32));
    // string
    serialize_test(NodeId::new(30, "Hello World"));
    // guid
    serialize_test(NodeId::new(99, Guid::new()));
    // byte string
    serialize_test(NodeId::new(99, ByteString::from(&[0x1, 0x2, 0x3, 0x4])));
}

// Encode a numeric node id and ensure it decodes to the same logical value regardless of which
// numeric sub-form the encoder chose.
#[test]
fn node_id_2253() {
    let node_id = NodeId::new(0, 2253u32);
    // ns 0 and a value > 255 picks the 4 byte form
    serialize_and_compare(node_id.clone(), &[0x01, 0x00, 0xcd, 0x08]);
    serialize_test(node_id.clone());

    // A peer may have encoded the same value in the full form, the decoder accepts it anyway
    let bytes = [0x02u8, 0x00, 0x00, 0xcd, 0x08, 0x00, 0x00];
    let mut stream = Cursor::new(bytes);
    let decoded = NodeId::decode(&mut stream, &DecodingOptions::test()).unwrap();
    assert_eq!(decoded, node_id);
}

#[test]
fn encoding_expanded_node_id() {
    // Plain
    serialize_test(ExpandedNodeId::new(NodeId::new(200, 2000u32)));
    // With namespace uri
    let mut e = ExpandedNodeId::new(NodeId::new(1, 52u32));
    e.namespace_uri = UAString::from("urn:some:namespace");
    serialize_test(e);
    // With server index
    let mut e = ExpandedNodeId::new(NodeId::new(1, 52u32));
    e.server_index = 12;
    serialize_test(e);
    // With both
    let mut e = ExpandedNodeId::new(NodeId::new(1, "expanded"));
    e.namespace_uri = UAString::from("urn:some:namespace");
    e.server_index = 666;
    serialize_test(e);
}

#[test]
fn expanded_node_id_flag_bits() {
    // The uri and server index flags are independent of the identifier encoding in the low nibble
    let mut e = ExpandedNodeId::new(NodeId::new(0, 5u32));
    e.namespace_uri = UAString::from("n");
    e.server_index = 3;
    let bytes = e.encode_to_vec();
    assert_eq!(bytes[0], 0x80 | 0x40);
}

#[test]
fn encoding_qualified_name() {
    let qname = QualifiedName {
        namespace_index: 100,
        name: UAString::from("this is a qualified name"),
    };
    serialize_test(qname);
}

#[test]
fn encoding_localized_text() {
    serialize_test(LocalizedText::null());
    serialize_test(LocalizedText::new("en-US", "A piece of text"));
    // Locale and text are independently optional
    serialize_test(LocalizedText {
        locale: UAString::null(),
        text: UAString::from("Text but no locale"),
    });
    serialize_test(LocalizedText {
        locale: UAString::from("en-GB"),
        text: UAString::null(),
    });
}

#[test]
fn diagnostic_info() {
    let mut d = DiagnosticInfo {
        symbolic_id: None,
        namespace_uri: None,
        locale: None,
        localized_text: None,
        additional_info: None,
        inner_status_code: None,
        inner_diagnostic_info: None,
    };
    serialize_test(d.clone());

    d.symbolic_id = Some(25);

    assert_eq!(d.encoding_mask().bits(), 0x1);

    d.namespace_uri = Some(100);
    assert_eq!(d.encoding_mask().bits(), 0x3);

    d.localized_text = Some(120);
    assert_eq!(d.encoding_mask().bits(), 0x7);

    d.locale = Some(110);
    assert_eq!(d.encoding_mask().bits(), 0xf);

    d.additional_info = Some(UAString::from("Hello world"));
    assert_eq!(d.encoding_mask().bits(), 0x1f);

    d.inner_status_code = Some(StatusCode::BadArgumentsMissing);
    assert_eq!(d.encoding_mask().bits(), 0x3f);

    serialize_test(d.clone());

    d.inner_diagnostic_info = Some(Box::new(DiagnosticInfo {
        symbolic_id: Some(99),
        namespace_uri: Some(437437),
        locale: Some(333),
        localized_text: Some(233),
        additional_info: Some(UAString::from("Nested diagnostic")),
        inner_status_code: Some(StatusCode::Good),
        inner_diagnostic_info: None,
    }));

    serialize_test(d.clone());
}

// Encoding a diagnostic info with 2 of its 7 fields set writes a mask with exactly those 2 bits
// and bytes for only those fields.
#[test]
fn diagnostic_info_sparse() {
    let d = DiagnosticInfo {
        symbolic_id: Some(5),
        namespace_uri: None,
        locale: None,
        localized_text: None,
        additional_info: None,
        inner_status_code: Some(StatusCode::BadTimeout),
        inner_diagnostic_info: None,
    };
    assert_eq!(d.encoding_mask().bits(), 0x1 | 0x20);
    // 1 mask byte + 4 bytes symbolic id + 4 bytes inner status code
    assert_eq!(d.byte_len(), 9);

    let decoded = serialize_test_and_return(d);
    assert_eq!(decoded.symbolic_id, Some(5));
    assert_eq!(decoded.inner_status_code, Some(StatusCode::BadTimeout));
    assert!(decoded.namespace_uri.is_none());
    assert!(decoded.locale.is_none());
    assert!(decoded.localized_text.is_none());
    assert!(decoded.additional_info.is_none());
    assert!(decoded.inner_diagnostic_info.is_none());
}

// An all-absent diagnostic info is a single zero byte on the wire
#[test]
fn diagnostic_info_empty() {
    let d = DiagnosticInfo::null();
    serialize_and_compare(d, &[0x00]);
}

#[test]
fn request_header() {
    let request_header = RequestHeader {
        authentication_token: NodeId::new(0, 99u32),
        timestamp: DateTime::now(),
        request_handle: 47,
        return_diagnostics: DiagnosticBits::SERVICE_LEVEL_SYMBOLIC_ID
            | DiagnosticBits::SERVICE_LEVEL_LOCALIZED_TEXT,
        audit_entry_id: UAString::from("audit"),
        timeout_hint: 123456,
        additional_header: ExtensionObject::null(),
    };
    serialize_test(request_header);
}

#[test]
fn response_header() {
    let response_header = ResponseHeader {
        timestamp: DateTime::now(),
        request_handle: 47,
        service_result: StatusCode::Good,
        service_diagnostics: DiagnosticInfo::null(),
        string_table: Some(vec![UAString::from("a"), UAString::null()]),
        additional_header: ExtensionObject::null(),
    };
    serialize_test(response_header);
}

// A ResponseHeader whose service diagnostics are all absent writes that field as exactly one
// zero byte.
#[test]
fn response_header_empty_diagnostics() {
    let response_header = ResponseHeader {
        timestamp: DateTime::epoch(),
        request_handle: 1,
        service_result: StatusCode::Good,
        service_diagnostics: DiagnosticInfo::null(),
        string_table: None,
        additional_header: ExtensionObject::null(),
    };
    let bytes = response_header.encode_to_vec();
    // timestamp 8, handle 4, result 4, then the single diagnostics byte
    assert_eq!(bytes[16], 0x00);
    // null string table follows immediately after
    assert_eq!(&bytes[17..21], &[0xff, 0xff, 0xff, 0xff]);

    let decoding_options = DecodingOptions::test();
    let mut stream = Cursor::new(bytes);
    let decoded = ResponseHeader::decode(&mut stream, &decoding_options).unwrap();
    assert_eq!(decoded.service_diagnostics, DiagnosticInfo::null());
}

#[test]
fn depth_gauge() {
    let dg = Arc::new(Mutex::new(DepthGauge::default()));

    let max_depth = {
        let dg = trace_lock!(dg);
        dg.max_depth()
    };
    assert_eq!(max_depth, crate::constants::MAX_DECODING_DEPTH);

    // Iterate the depth
    {
        let mut v = Vec::new();
        for _ in 0..max_depth {
            v.push(DepthLock::obtain(dg.clone()).unwrap());
        }

        // Depth should now be MAX_DECODING_DEPTH
        {
            let dg = trace_lock!(dg);
            assert_eq!(dg.current_depth(), max_depth);
        }

        // Next obtain should fail
        assert_eq!(
            DepthLock::obtain(dg.clone()).unwrap_err(),
            StatusCode::BadDecodingError
        );

        // DepthLocks drop here
    }

    // Depth should be zero
    {
        let dg = trace_lock!(dg);
        assert_eq!(dg.current_depth(), 0);
    }
}
