// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Hand maintained subsets of the standard's NodeIds table - the built-in data type ids used by
//! the variant encoding mask and the encoding object ids of the service types carried by this
//! crate. The full tables are machine generated from the standard's CSV in the server / client
//! layers; the codec only needs these entries.

use std::convert::TryFrom;

use crate::{expanded_node_id::ExpandedNodeId, node_id::NodeId};

/// Well known data type ids from namespace 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum DataTypeId {
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    Structure = 22,
    DataValue = 23,
    BaseDataType = 24,
    DiagnosticInfo = 25,
    RequestHeader = 389,
    ResponseHeader = 392,
    ServiceFault = 395,
    TimestampsToReturn = 625,
    ReadValueId = 626,
    ReadRequest = 629,
    ReadResponse = 632,
    MonitoringFilter = 719,
    DataChangeFilter = 722,
    DataChangeTrigger = 717,
}

/// Well known object ids from namespace 0 - the default encoding nodes of the service types
/// carried by this crate.
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum ObjectId {
    RequestHeader_Encoding_DefaultXml = 390,
    RequestHeader_Encoding_DefaultBinary = 391,
    ResponseHeader_Encoding_DefaultXml = 393,
    ResponseHeader_Encoding_DefaultBinary = 394,
    ServiceFault_Encoding_DefaultXml = 396,
    ServiceFault_Encoding_DefaultBinary = 397,
    ReadValueId_Encoding_DefaultXml = 627,
    ReadValueId_Encoding_DefaultBinary = 628,
    ReadRequest_Encoding_DefaultXml = 630,
    ReadRequest_Encoding_DefaultBinary = 631,
    ReadResponse_Encoding_DefaultXml = 633,
    ReadResponse_Encoding_DefaultBinary = 634,
    MonitoringFilter_Encoding_DefaultXml = 720,
    MonitoringFilter_Encoding_DefaultBinary = 721,
    DataChangeFilter_Encoding_DefaultXml = 723,
    DataChangeFilter_Encoding_DefaultBinary = 724,
}

impl From<DataTypeId> for NodeId {
    fn from(v: DataTypeId) -> Self {
        NodeId::new(0, v as u32)
    }
}

impl From<DataTypeId> for ExpandedNodeId {
    fn from(v: DataTypeId) -> Self {
        ExpandedNodeId::new(NodeId::from(v))
    }
}

impl From<ObjectId> for NodeId {
    fn from(v: ObjectId) -> Self {
        NodeId::new(0, v as u32)
    }
}

impl From<ObjectId> for ExpandedNodeId {
    fn from(v: ObjectId) -> Self {
        ExpandedNodeId::new(NodeId::from(v))
    }
}

impl TryFrom<u32> for ObjectId {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            390 => Ok(ObjectId::RequestHeader_Encoding_DefaultXml),
            391 => Ok(ObjectId::RequestHeader_Encoding_DefaultBinary),
            393 => Ok(ObjectId::ResponseHeader_Encoding_DefaultXml),
            394 => Ok(ObjectId::ResponseHeader_Encoding_DefaultBinary),
            396 => Ok(ObjectId::ServiceFault_Encoding_DefaultXml),
            397 => Ok(ObjectId::ServiceFault_Encoding_DefaultBinary),
            627 => Ok(ObjectId::ReadValueId_Encoding_DefaultXml),
            628 => Ok(ObjectId::ReadValueId_Encoding_DefaultBinary),
            630 => Ok(ObjectId::ReadRequest_Encoding_DefaultXml),
            631 => Ok(ObjectId::ReadRequest_Encoding_DefaultBinary),
            633 => Ok(ObjectId::ReadResponse_Encoding_DefaultXml),
            634 => Ok(ObjectId::ReadResponse_Encoding_DefaultBinary),
            720 => Ok(ObjectId::MonitoringFilter_Encoding_DefaultXml),
            721 => Ok(ObjectId::MonitoringFilter_Encoding_DefaultBinary),
            723 => Ok(ObjectId::DataChangeFilter_Encoding_DefaultXml),
            724 => Ok(ObjectId::DataChangeFilter_Encoding_DefaultBinary),
            _ => Err(()),
        }
    }
}
