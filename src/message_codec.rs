// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the `MessageCodec`, the driver that turns a type-erased encodeable into its wire
//! form and back.
//!
//! Encoding runs in two phases - the measuring pass (`calc_size` / `byte_len`) walks the whole
//! value graph producing only a byte count, then the writing pass emits the bytes, consuming the
//! measured sizes wherever a length prefix precedes its region. Decoding is single phase: the
//! codec reads the encoding id, resolves it in the registry and hands the stream to the
//! registered reader. A message decode commits to a concrete type, so an unresolvable id here is
//! a hard error, unlike the opaque degradation extension objects perform.

use std::{
    io::{Cursor, Read, Write},
    sync::Arc,
};

use crate::{
    encodeable::Encodeable,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    registry::EncodeableLookup,
    status_code::StatusCode,
};

pub struct MessageCodec {
    registry: Arc<dyn EncodeableLookup>,
    decoding_options: DecodingOptions,
}

impl MessageCodec {
    /// Creates a codec over the supplied registry. The registry is also attached to the decoding
    /// options so that nested extension objects resolve against the same table.
    pub fn new(registry: Arc<dyn EncodeableLookup>, decoding_options: DecodingOptions) -> Self {
        let decoding_options = decoding_options.with_registry(registry.clone());
        MessageCodec {
            registry,
            decoding_options,
        }
    }

    pub fn decoding_options(&self) -> &DecodingOptions {
        &self.decoding_options
    }

    /// Encodes a message as its binary encoding id followed by its body. The measuring pass runs
    /// first over the whole message; an encode that would exceed the maximum message size is
    /// rejected before a single byte is written.
    pub fn encode_message(
        &self,
        message: &dyn Encodeable,
        stream: &mut dyn Write,
    ) -> EncodingResult<usize> {
        let encoding_id = message.encoding_ids().binary_encoding_id;
        let byte_len = encoding_id.byte_len() + message.calc_size();
        let max_message_size = self.decoding_options.max_message_size;
        if max_message_size > 0 && byte_len > max_message_size {
            error!(
                "Message of {} bytes exceeds max message size {}",
                byte_len, max_message_size
            );
            return Err(StatusCode::BadEncodingLimitsExceeded);
        }
        let mut stream = stream;
        let mut size = encoding_id.encode(&mut stream)?;
        // Prefer the registered writer so that a value and its registry entry cannot disagree;
        // an unregistered message still encodes through its own impl.
        size += match self.registry.resolve_type_id(message.as_any().type_id()) {
            Some(entry) => entry.write(message, stream)?,
            None => message.write(stream)?,
        };
        assert_eq!(size, byte_len);
        Ok(size)
    }

    /// Encodes a message to a buffer sized by the measuring pass.
    pub fn encode_message_to_vec(&self, message: &dyn Encodeable) -> EncodingResult<Vec<u8>> {
        let byte_len = message.encoding_ids().binary_encoding_id.byte_len() + message.calc_size();
        let mut stream = Cursor::new(Vec::with_capacity(byte_len));
        self.encode_message(message, &mut stream)?;
        Ok(stream.into_inner())
    }

    /// Reads the encoding id from the stream, resolves it and delegates to the registered
    /// reader. The decoded message is concrete behind the trait object and can be downcast.
    pub fn decode_message(&self, stream: &mut dyn Read) -> EncodingResult<Box<dyn Encodeable>> {
        let mut stream = stream;
        let encoding_id = ExpandedNodeId::decode(&mut stream, &self.decoding_options)?;
        let Some(entry) = self.registry.resolve(&encoding_id) else {
            error!("Cannot decode message with unknown data type id {}", encoding_id);
            return Err(StatusCode::BadDataTypeIdUnknown);
        };
        entry.decode(stream, &self.decoding_options)
    }
}
