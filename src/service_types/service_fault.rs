// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::io::{Read, Write};

use crate::{
    encodeable::MessageInfo,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    node_ids::{DataTypeId, ObjectId},
    request_header::RequestHeader,
    response_header::ResponseHeader,
    status_code::StatusCode,
};

/// The response a server sends when a service level error occurred and no service specific
/// response can be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFault {
    pub response_header: ResponseHeader,
}

impl MessageInfo for ServiceFault {
    fn data_type_id() -> ExpandedNodeId {
        DataTypeId::ServiceFault.into()
    }
    fn binary_encoding_id() -> ExpandedNodeId {
        ObjectId::ServiceFault_Encoding_DefaultBinary.into()
    }
    fn xml_encoding_id() -> ExpandedNodeId {
        ObjectId::ServiceFault_Encoding_DefaultXml.into()
    }
}

impl BinaryEncoder<ServiceFault> for ServiceFault {
    fn byte_len(&self) -> usize {
        self.response_header.byte_len()
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        self.response_header.encode(stream)
    }

    fn decode<S: Read>(stream: &mut S, decoding_options: &DecodingOptions) -> EncodingResult<Self> {
        let response_header = ResponseHeader::decode(stream, decoding_options)?;
        Ok(ServiceFault { response_header })
    }
}

impl ServiceFault {
    pub fn new(request_header: &RequestHeader, service_result: StatusCode) -> ServiceFault {
        ServiceFault {
            response_header: ResponseHeader::new_service_result(request_header, service_result),
        }
    }
}
