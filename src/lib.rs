// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The OPC UA binary codec - the encodeable type system, the built-in wire types and the
//! serializer registry that lets a receiver decode structures it has never seen the concrete
//! type of.
//!
//! The crate is deliberately transport-agnostic. It owns the `BinaryEncoder` contract (size
//! calculation, encoding, decoding), the built-in types of OPC UA Part 6 (numbers, strings,
//! identifiers, variants, diagnostics, extension objects) and the registry that maps encoding
//! ids onto size / write / read logic. Chunking, security and sessions live elsewhere and
//! consume these abstractions.

#![allow(non_upper_case_globals)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::float_cmp)]
#![allow(clippy::from_over_into)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate serde_derive;

/// Tracing macro for obtaining a lock on a `Mutex`. Sometimes deadlocks can happen in code,
/// and if they do, this macro is useful for finding out where they happened.
#[macro_export]
macro_rules! trace_lock {
    ( $x:expr ) => {{
        let v = $x.lock();
        v
    }};
}

/// Compiled-in defaults for the limits in `DecodingOptions`. The transport layer normally
/// overrides these from its configuration.
pub mod constants {
    /// Maximum number of bytes in a string permitted by default
    pub const MAX_STRING_LENGTH: usize = 65535;
    /// Maximum number of bytes in a byte string permitted by default
    pub const MAX_BYTE_STRING_LENGTH: usize = 65535;
    /// Maximum number of array elements permitted by default
    pub const MAX_ARRAY_LENGTH: usize = 1000;
    /// Maximum size of a message in bytes, 0 = no limit
    pub const MAX_MESSAGE_SIZE: usize = 327675;
    /// Maximum number of chunks in a message, 0 = no limit
    pub const MAX_CHUNK_COUNT: usize = 5;
    /// Default maximum recursion depth when decoding nested variants, extension objects and
    /// diagnostic infos.
    pub const MAX_DECODING_DEPTH: usize = 10;
}

pub mod array;
pub mod byte_string;
pub mod data_types;
pub mod data_value;
pub mod date_time;
pub mod diagnostic_info;
pub mod encodeable;
pub mod encoding;
pub mod expanded_node_id;
pub mod extension_object;
pub mod guid;
pub mod localized_text;
pub mod message_codec;
pub mod node_id;
pub mod node_ids;
pub mod qualified_name;
pub mod registry;
pub mod request_header;
pub mod response_header;
pub mod service_types;
pub mod status_code;
pub mod string;
pub mod variant;

mod basic_types;

#[cfg(test)]
mod tests;

pub use crate::{
    array::*,
    byte_string::ByteString,
    data_types::*,
    data_value::DataValue,
    date_time::DateTime,
    diagnostic_info::{DiagnosticBits, DiagnosticInfo},
    encodeable::{Encodeable, EncodingIds, MessageInfo},
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    extension_object::{ExtensionObject, ExtensionObjectBody},
    guid::Guid,
    localized_text::LocalizedText,
    message_codec::MessageCodec,
    node_id::{Identifier, NodeId},
    node_ids::{DataTypeId, ObjectId},
    qualified_name::QualifiedName,
    registry::{EncodeableEntry, EncodeableLookup, EncodeableRegistry, RegistrySet},
    request_header::RequestHeader,
    response_header::ResponseHeader,
    status_code::StatusCode,
    string::{UAString, XmlElement},
    variant::{Variant, VariantTypeId},
};
