// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the serializer registry - the runtime table that maps an encoding id (or a concrete
//! type handle) onto the size / write / read logic of an encodeable type, so a receiver can
//! decode a structure without knowing its concrete type up front.
//!
//! Registration happens once, while the registry is being constructed; afterwards the registry is
//! shared behind an `Arc` and only ever read, so concurrent decodes need no locking. Registries
//! compose through `RegistrySet`, which resolves against an ordered list of children, first match
//! wins. A failed lookup is not an error at this level - extension object decoding degrades to
//! the opaque byte form, and only callers that require a concrete type turn a miss into
//! `BadDataTypeIdUnknown`.

use std::{
    any::TypeId,
    collections::HashMap,
    fmt,
    io::{Read, Write},
    sync::Arc,
};

use crate::{
    encodeable::{Encodeable, EncodingIds, MessageInfo},
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    status_code::StatusCode,
};

/// Calculates the size of a type-erased value. Fails if the value is not of the entry's type.
pub type CalcSizeFn = fn(&dyn Encodeable) -> EncodingResult<usize>;
/// Writes a type-erased value. Fails if the value is not of the entry's type.
pub type WriteFn = fn(&dyn Encodeable, &mut dyn Write) -> EncodingResult<usize>;
/// Reads a value of the entry's type from the stream.
pub type ReadFn = fn(&mut dyn Read, &DecodingOptions) -> EncodingResult<Box<dyn Encodeable>>;

fn calc_size_of<T>(value: &dyn Encodeable) -> EncodingResult<usize>
where
    T: BinaryEncoder<T> + Encodeable,
{
    downcast::<T>(value).map(|value| value.byte_len())
}

fn write_of<T>(value: &dyn Encodeable, mut stream: &mut dyn Write) -> EncodingResult<usize>
where
    T: BinaryEncoder<T> + Encodeable,
{
    downcast::<T>(value)?.encode(&mut stream)
}

fn read_of<T>(
    stream: &mut dyn Read,
    decoding_options: &DecodingOptions,
) -> EncodingResult<Box<dyn Encodeable>>
where
    T: BinaryEncoder<T> + Encodeable,
{
    let mut stream = stream;
    Ok(Box::new(T::decode(&mut stream, decoding_options)?))
}

fn downcast<T: Encodeable>(value: &dyn Encodeable) -> EncodingResult<&T> {
    value.as_any().downcast_ref::<T>().ok_or_else(|| {
        error!("Serializer was handed a value of the wrong concrete type");
        StatusCode::BadEncodingError
    })
}

/// The dispatch record held per registered type - the identity triple and the three serializer
/// functions.
#[derive(Debug, Clone)]
pub struct EncodeableEntry {
    ids: EncodingIds,
    calc_size_fn: CalcSizeFn,
    write_fn: WriteFn,
    read_fn: ReadFn,
}

impl EncodeableEntry {
    pub fn ids(&self) -> &EncodingIds {
        &self.ids
    }

    pub fn calc_size(&self, value: &dyn Encodeable) -> EncodingResult<usize> {
        (self.calc_size_fn)(value)
    }

    pub fn write(&self, value: &dyn Encodeable, stream: &mut dyn Write) -> EncodingResult<usize> {
        (self.write_fn)(value, stream)
    }

    pub fn decode(
        &self,
        stream: &mut dyn Read,
        decoding_options: &DecodingOptions,
    ) -> EncodingResult<Box<dyn Encodeable>> {
        (self.read_fn)(stream, decoding_options)
    }
}

/// Resolution interface shared by a plain registry and a composed set of registries, so the
/// decoder does not care which it was handed.
pub trait EncodeableLookup: fmt::Debug + Send + Sync {
    /// Resolves an encoding id (binary or XML) to its dispatch record.
    fn resolve(&self, encoding_id: &ExpandedNodeId) -> Option<Arc<EncodeableEntry>>;
    /// Resolves a concrete runtime type to its dispatch record.
    fn resolve_type_id(&self, type_id: TypeId) -> Option<Arc<EncodeableEntry>>;
}

/// A table of encodeable types keyed by their encoding ids and their runtime type. Build it at
/// startup, then share it behind an `Arc` - it is read-only from then on.
#[derive(Debug, Default)]
pub struct EncodeableRegistry {
    by_encoding_id: HashMap<ExpandedNodeId, Arc<EncodeableEntry>>,
    by_type: HashMap<TypeId, Arc<EncodeableEntry>>,
}

impl EncodeableRegistry {
    pub fn new() -> EncodeableRegistry {
        EncodeableRegistry::default()
    }

    /// Registers a type, deriving the identity triple and serializer functions from its impls.
    pub fn register<T>(&mut self)
    where
        T: MessageInfo + BinaryEncoder<T> + Encodeable,
    {
        let ids = EncodingIds {
            data_type_id: <T as MessageInfo>::data_type_id(),
            binary_encoding_id: <T as MessageInfo>::binary_encoding_id(),
            xml_encoding_id: <T as MessageInfo>::xml_encoding_id(),
        };
        self.add_serializer(
            TypeId::of::<T>(),
            ids,
            calc_size_of::<T>,
            write_of::<T>,
            read_of::<T>,
        );
    }

    /// Adds a serializer under the supplied identity triple. The entry is looked up by either
    /// of its encoding ids or by the runtime type handle. Later registrations of the same id
    /// replace earlier ones.
    pub fn add_serializer(
        &mut self,
        type_id: TypeId,
        ids: EncodingIds,
        calc_size_fn: CalcSizeFn,
        write_fn: WriteFn,
        read_fn: ReadFn,
    ) {
        let entry = Arc::new(EncodeableEntry {
            ids: ids.clone(),
            calc_size_fn,
            write_fn,
            read_fn,
        });
        self.by_encoding_id
            .insert(ids.binary_encoding_id, entry.clone());
        self.by_encoding_id.insert(ids.xml_encoding_id, entry.clone());
        self.by_type.insert(type_id, entry);
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl EncodeableLookup for EncodeableRegistry {
    fn resolve(&self, encoding_id: &ExpandedNodeId) -> Option<Arc<EncodeableEntry>> {
        self.by_encoding_id.get(encoding_id).cloned()
    }

    fn resolve_type_id(&self, type_id: TypeId) -> Option<Arc<EncodeableEntry>> {
        self.by_type.get(&type_id).cloned()
    }
}

/// An ordered composition of registries. Lookups try each child in the order they were added and
/// the first match wins, which lets a generated type table be layered over a fallback registry
/// without either knowing about the other.
#[derive(Debug, Default)]
pub struct RegistrySet {
    registries: Vec<Arc<dyn EncodeableLookup>>,
}

impl RegistrySet {
    pub fn new() -> RegistrySet {
        RegistrySet::default()
    }

    /// Appends a registry. Registries added earlier take precedence on lookup.
    pub fn add_registry(&mut self, registry: Arc<dyn EncodeableLookup>) {
        self.registries.push(registry);
    }
}

impl EncodeableLookup for RegistrySet {
    fn resolve(&self, encoding_id: &ExpandedNodeId) -> Option<Arc<EncodeableEntry>> {
        self.registries
            .iter()
            .find_map(|registry| registry.resolve(encoding_id))
    }

    fn resolve_type_id(&self, type_id: TypeId) -> Option<Arc<EncodeableEntry>> {
        self.registries
            .iter()
            .find_map(|registry| registry.resolve_type_id(type_id))
    }
}
