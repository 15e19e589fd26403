// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the `Encodeable` contract - the object safe face of every structured type that can
//! compute its encoded size and serialize / deserialize itself, together with the identity
//! handles the serializer registry dispatches on.
//!
//! Concrete types implement the statically dispatched `BinaryEncoder` as usual and declare their
//! identity through `MessageInfo`; a blanket impl lifts any such type into `Encodeable` so it can
//! travel type-erased through extension objects and the registry.

use std::{
    any::Any,
    fmt,
    io::Write,
};

use crate::{encoding::*, expanded_node_id::ExpandedNodeId};

/// The identity triple of an encodeable type. The data type id names the abstract type, the two
/// encoding ids name its default binary and XML encodings. Fixed at the type level, never per
/// instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingIds {
    pub data_type_id: ExpandedNodeId,
    pub binary_encoding_id: ExpandedNodeId,
    pub xml_encoding_id: ExpandedNodeId,
}

/// Implemented by every structured type to declare its identity handles. These are associated
/// functions rather than methods - the identity belongs to the type, not the value.
pub trait MessageInfo {
    /// The node id of the abstract data type
    fn data_type_id() -> ExpandedNodeId;
    /// The node id of the default binary encoding of the type
    fn binary_encoding_id() -> ExpandedNodeId;
    /// The node id of the default XML encoding of the type
    fn xml_encoding_id() -> ExpandedNodeId;
}

/// The object safe serialization contract. `calc_size` is the measuring pass and must visit the
/// same fields in the same order as `write`, because field order determines where nested length
/// prefixes land. Reading happens through the registry (a constructor cannot be object safe), see
/// `EncodeableRegistry`.
pub trait Encodeable: Any + fmt::Debug + Send + Sync {
    /// Returns the exact number of bytes `write` will produce for this value.
    fn calc_size(&self) -> usize;
    /// Writes the value field by field in declaration order.
    fn write(&self, stream: &mut dyn Write) -> EncodingResult<usize>;
    /// The identity handles of the concrete type.
    fn encoding_ids(&self) -> EncodingIds;
    /// Supports downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Clones the value behind the trait object.
    fn clone_box(&self) -> Box<dyn Encodeable>;
    /// Structural equality against another type-erased value. False when the concrete types
    /// differ.
    fn eq_box(&self, other: &dyn Encodeable) -> bool;
}

impl<T> Encodeable for T
where
    T: MessageInfo + BinaryEncoder<T> + Any + fmt::Debug + Send + Sync + Clone + PartialEq,
{
    fn calc_size(&self) -> usize {
        self.byte_len()
    }

    fn write(&self, mut stream: &mut dyn Write) -> EncodingResult<usize> {
        self.encode(&mut stream)
    }

    fn encoding_ids(&self) -> EncodingIds {
        EncodingIds {
            data_type_id: <T as MessageInfo>::data_type_id(),
            binary_encoding_id: <T as MessageInfo>::binary_encoding_id(),
            xml_encoding_id: <T as MessageInfo>::xml_encoding_id(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn Encodeable> {
        Box::new(self.clone())
    }

    fn eq_box(&self, other: &dyn Encodeable) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map(|other| self == other)
            .unwrap_or(false)
    }
}

impl PartialEq for dyn Encodeable {
    fn eq(&self, other: &dyn Encodeable) -> bool {
        self.eq_box(other)
    }
}

impl Clone for Box<dyn Encodeable> {
    fn clone(&self) -> Box<dyn Encodeable> {
        self.clone_box()
    }
}
