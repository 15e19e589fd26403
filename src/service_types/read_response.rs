// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::io::{Read, Write};

use crate::{
    data_value::DataValue,
    diagnostic_info::DiagnosticInfo,
    encodeable::MessageInfo,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    node_ids::{DataTypeId, ObjectId},
    response_header::ResponseHeader,
};

/// The results of a read operation, one `DataValue` per `ReadValueId` in the request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResponse {
    pub response_header: ResponseHeader,
    pub results: Option<Vec<DataValue>>,
    pub diagnostic_infos: Option<Vec<DiagnosticInfo>>,
}

impl MessageInfo for ReadResponse {
    fn data_type_id() -> ExpandedNodeId {
        DataTypeId::ReadResponse.into()
    }
    fn binary_encoding_id() -> ExpandedNodeId {
        ObjectId::ReadResponse_Encoding_DefaultBinary.into()
    }
    fn xml_encoding_id() -> ExpandedNodeId {
        ObjectId::ReadResponse_Encoding_DefaultXml.into()
    }
}

impl BinaryEncoder<ReadResponse> for ReadResponse {
    fn byte_len(&self) -> usize {
        let mut size = 0;
        size += self.response_header.byte_len();
        size += byte_len_array(&self.results);
        size += byte_len_array(&self.diagnostic_infos);
        size
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        let mut size = 0;
        size += self.response_header.encode(stream)?;
        size += write_array(stream, &self.results)?;
        size += write_array(stream, &self.diagnostic_infos)?;
        assert_eq!(size, self.byte_len());
        Ok(size)
    }

    fn decode<S: Read>(stream: &mut S, decoding_options: &DecodingOptions) -> EncodingResult<Self> {
        let response_header = ResponseHeader::decode(stream, decoding_options)?;
        let results: Option<Vec<DataValue>> = read_array(stream, decoding_options)?;
        let diagnostic_infos: Option<Vec<DiagnosticInfo>> = read_array(stream, decoding_options)?;
        Ok(ReadResponse {
            response_header,
            results,
            diagnostic_infos,
        })
    }
}
