// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::io::{Read, Write};

use crate::{
    data_types::IntegerId,
    encodeable::MessageInfo,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    node_id::NodeId,
    node_ids::{DataTypeId, ObjectId},
    qualified_name::QualifiedName,
    string::UAString,
};

/// Identifies an attribute of a node to read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadValueId {
    pub node_id: NodeId,
    pub attribute_id: IntegerId,
    pub index_range: UAString,
    pub data_encoding: QualifiedName,
}

impl MessageInfo for ReadValueId {
    fn data_type_id() -> ExpandedNodeId {
        DataTypeId::ReadValueId.into()
    }
    fn binary_encoding_id() -> ExpandedNodeId {
        ObjectId::ReadValueId_Encoding_DefaultBinary.into()
    }
    fn xml_encoding_id() -> ExpandedNodeId {
        ObjectId::ReadValueId_Encoding_DefaultXml.into()
    }
}

impl BinaryEncoder<ReadValueId> for ReadValueId {
    fn byte_len(&self) -> usize {
        let mut size = 0;
        size += self.node_id.byte_len();
        size += self.attribute_id.byte_len();
        size += self.index_range.byte_len();
        size += self.data_encoding.byte_len();
        size
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        let mut size = 0;
        size += self.node_id.encode(stream)?;
        size += self.attribute_id.encode(stream)?;
        size += self.index_range.encode(stream)?;
        size += self.data_encoding.encode(stream)?;
        assert_eq!(size, self.byte_len());
        Ok(size)
    }

    fn decode<S: Read>(stream: &mut S, decoding_options: &DecodingOptions) -> EncodingResult<Self> {
        let node_id = NodeId::decode(stream, decoding_options)?;
        let attribute_id = IntegerId::decode(stream, decoding_options)?;
        let index_range = UAString::decode(stream, decoding_options)?;
        let data_encoding = QualifiedName::decode(stream, decoding_options)?;
        Ok(ReadValueId {
            node_id,
            attribute_id,
            index_range,
            data_encoding,
        })
    }
}

impl Default for ReadValueId {
    fn default() -> Self {
        Self {
            node_id: NodeId::null(),
            attribute_id: 0,
            index_range: UAString::null(),
            data_encoding: QualifiedName::null(),
        }
    }
}
