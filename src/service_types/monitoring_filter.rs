// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::io::{Read, Write};

use crate::{
    encodeable::MessageInfo,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    node_ids::{DataTypeId, ObjectId},
};

/// The abstract base of the monitoring filters. It has no fields of its own - a concrete filter
/// such as `DataChangeFilter` is selected one level up, by the encoding id carried on the
/// extension object, never by this type. It still implements the full encoding contract as a
/// no-op so it can travel where a filter is expected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonitoringFilter {}

impl MessageInfo for MonitoringFilter {
    fn data_type_id() -> ExpandedNodeId {
        DataTypeId::MonitoringFilter.into()
    }
    fn binary_encoding_id() -> ExpandedNodeId {
        ObjectId::MonitoringFilter_Encoding_DefaultBinary.into()
    }
    fn xml_encoding_id() -> ExpandedNodeId {
        ObjectId::MonitoringFilter_Encoding_DefaultXml.into()
    }
}

impl BinaryEncoder<MonitoringFilter> for MonitoringFilter {
    fn byte_len(&self) -> usize {
        0
    }

    fn encode<S: Write>(&self, _stream: &mut S) -> EncodingResult<usize> {
        Ok(0)
    }

    fn decode<S: Read>(_stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
        Ok(MonitoringFilter {})
    }
}
