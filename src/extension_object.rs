// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ExtensionObject`.

use std::{
    error::Error,
    fmt,
    io::{Cursor, Read, Write},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    byte_string::ByteString,
    encodeable::Encodeable,
    encoding::*,
    expanded_node_id::ExpandedNodeId,
    node_ids::ObjectId,
    status_code::StatusCode,
    string::XmlElement,
};

#[derive(Debug)]
pub struct ExtensionObjectError;

impl fmt::Display for ExtensionObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtensionObjectError")
    }
}

impl Error for ExtensionObjectError {}

/// Enumeration that holds the kinds of body that an ExtensionObject may carry.
#[derive(PartialEq, Debug, Clone)]
pub enum ExtensionObjectBody {
    /// For an extension object with nothing encoded with it
    None,
    /// For an extension object with data encoded in a ByteString. This is also the decoded form
    /// of any body whose encoding id is not in the serializer registry - the raw bytes and the
    /// id are retained so the value can be stored or forwarded opaquely.
    ByteString(ByteString),
    /// For an extension object with data encoded in an XML string
    XmlElement(XmlElement),
    /// For an extension object whose body was resolved through the serializer registry into a
    /// concrete encodeable.
    Decoded(Box<dyn Encodeable>),
}

/// An extension object holds a serialized object identified by the node id of its encoding, not
/// of its abstract type. The body is length prefixed so that a receiver which cannot resolve the
/// id can still skip or retain it.
#[derive(PartialEq, Debug, Clone)]
pub struct ExtensionObject {
    pub node_id: ExpandedNodeId,
    pub body: ExtensionObjectBody,
}

impl Default for ExtensionObject {
    fn default() -> Self {
        Self::null()
    }
}

// The named-field serialization always carries the opaque form of the body - a decoded body is
// binary encoded back into bytes first.

#[derive(Serialize, Deserialize)]
#[serde(rename = "ExtensionObject")]
struct OpaqueExtensionObject {
    node_id: ExpandedNodeId,
    body: OpaqueBody,
}

#[derive(Serialize, Deserialize)]
enum OpaqueBody {
    None,
    ByteString(ByteString),
    XmlElement(XmlElement),
}

impl Serialize for ExtensionObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let body = match &self.body {
            ExtensionObjectBody::None => OpaqueBody::None,
            ExtensionObjectBody::ByteString(value) => OpaqueBody::ByteString(value.clone()),
            ExtensionObjectBody::XmlElement(value) => OpaqueBody::XmlElement(value.clone()),
            ExtensionObjectBody::Decoded(value) => {
                let mut stream = Cursor::new(Vec::with_capacity(value.calc_size()));
                value.write(&mut stream).map_err(serde::ser::Error::custom)?;
                OpaqueBody::ByteString(ByteString::from(stream.into_inner()))
            }
        };
        OpaqueExtensionObject {
            node_id: self.node_id.clone(),
            body,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExtensionObject {
    fn deserialize<D>(deserializer: D) -> Result<ExtensionObject, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = OpaqueExtensionObject::deserialize(deserializer)?;
        let body = match value.body {
            OpaqueBody::None => ExtensionObjectBody::None,
            OpaqueBody::ByteString(value) => ExtensionObjectBody::ByteString(value),
            OpaqueBody::XmlElement(value) => ExtensionObjectBody::XmlElement(value),
        };
        Ok(ExtensionObject {
            node_id: value.node_id,
            body,
        })
    }
}

impl BinaryEncoder<ExtensionObject> for ExtensionObject {
    fn byte_len(&self) -> usize {
        let mut size = self.node_id.byte_len();
        size += match self.body {
            ExtensionObjectBody::None => 1,
            ExtensionObjectBody::ByteString(ref value) => {
                // Encoding mask + data
                1 + value.byte_len()
            }
            ExtensionObjectBody::XmlElement(ref value) => {
                // Encoding mask + data
                1 + value.byte_len()
            }
            ExtensionObjectBody::Decoded(ref value) => {
                // Encoding mask + length prefix + the structure itself
                1 + 4 + value.calc_size()
            }
        };
        size
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        let mut size = 0;
        size += self.node_id.encode(stream)?;
        match self.body {
            ExtensionObjectBody::None => {
                size += write_u8(stream, 0x0)?;
            }
            ExtensionObjectBody::ByteString(ref value) => {
                // Encoding mask + data
                size += write_u8(stream, 0x1)?;
                size += value.encode(stream)?;
            }
            ExtensionObjectBody::XmlElement(ref value) => {
                // Encoding mask + data
                size += write_u8(stream, 0x2)?;
                size += value.encode(stream)?;
            }
            ExtensionObjectBody::Decoded(ref value) => {
                // The length prefix is known from the measuring pass before a single byte of the
                // body is written.
                size += write_u8(stream, 0x1)?;
                size += write_i32(stream, value.calc_size() as i32)?;
                size += value.write(stream)?;
            }
        }
        assert_eq!(size, self.byte_len());
        Ok(size)
    }

    fn decode<S: Read>(stream: &mut S, decoding_options: &DecodingOptions) -> EncodingResult<Self> {
        // Extension object is depth checked to prevent deep recursion
        let _depth_lock = decoding_options.depth_lock()?;
        let node_id = ExpandedNodeId::decode(stream, decoding_options)?;
        let encoding_type = u8::decode(stream, decoding_options)?;
        let body = match encoding_type {
            0x0 => ExtensionObjectBody::None,
            0x1 => {
                let body = ByteString::decode(stream, decoding_options)?;
                Self::resolve_body(&node_id, body, decoding_options)?
            }
            0x2 => {
                ExtensionObjectBody::XmlElement(XmlElement::decode(stream, decoding_options)?)
            }
            _ => {
                error!("Invalid encoding type {} in stream", encoding_type);
                return Err(StatusCode::BadDecodingError);
            }
        };
        Ok(ExtensionObject { node_id, body })
    }
}

impl ExtensionObject {
    /// Creates a null extension object, i.e. one with no value or payload
    pub fn null() -> ExtensionObject {
        ExtensionObject {
            node_id: ExpandedNodeId::null(),
            body: ExtensionObjectBody::None,
        }
    }

    /// Tests for null node id.
    pub fn is_null(&self) -> bool {
        self.node_id.is_null()
    }

    /// Tests for empty body.
    pub fn is_empty(&self) -> bool {
        self.is_null() || matches!(self.body, ExtensionObjectBody::None)
    }

    /// Returns the object id of the thing this extension object contains, assuming the
    /// object id can be recognised from the node id.
    pub fn object_id(&self) -> Result<ObjectId, ExtensionObjectError> {
        self.node_id
            .node_id
            .as_object_id()
            .map_err(|_| ExtensionObjectError)
    }

    /// Creates an extension object with the specified node id and the encodable object as its
    /// payload. The body is the concrete value itself; encoding writes it through a length
    /// prefix computed by the measuring pass.
    pub fn from_encodable<N, T>(node_id: N, encodable: &T) -> ExtensionObject
    where
        N: Into<ExpandedNodeId>,
        T: Encodeable + Clone,
    {
        ExtensionObject {
            node_id: node_id.into(),
            body: ExtensionObjectBody::Decoded(Box::new(encodable.clone())),
        }
    }

    /// Creates an extension object carrying a pre-serialized byte string body.
    pub fn from_byte_string<N>(node_id: N, body: ByteString) -> ExtensionObject
    where
        N: Into<ExpandedNodeId>,
    {
        ExtensionObject {
            node_id: node_id.into(),
            body: ExtensionObjectBody::ByteString(body),
        }
    }

    /// Returns a reference to the decoded body downcast to the expected type, if the body was
    /// resolved to that type.
    pub fn decoded_as<T>(&self) -> Option<&T>
    where
        T: Encodeable,
    {
        match &self.body {
            ExtensionObjectBody::Decoded(value) => value.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Decodes the inner content of the extension object as the concretely known, mandatory
    /// type `T` and returns it. The node id is not consulted - the caller has already committed
    /// to the type. Errors result in a decoding error.
    pub fn decode_inner<T>(&self, decoding_options: &DecodingOptions) -> EncodingResult<T>
    where
        T: BinaryEncoder<T> + Encodeable + Clone,
    {
        match self.body {
            ExtensionObjectBody::ByteString(ref byte_string) => {
                if let Some(ref value) = byte_string.value {
                    let mut stream = Cursor::new(value);
                    let decoded = T::decode(&mut stream, decoding_options)?;
                    // The reader must consume exactly the declared body, otherwise the stream
                    // was malformed for this type.
                    if stream.position() as usize != value.len() {
                        error!(
                            "Decoded body consumed {} bytes of a {} byte body",
                            stream.position(),
                            value.len()
                        );
                        Err(StatusCode::BadDecodingError)
                    } else {
                        Ok(decoded)
                    }
                } else {
                    Err(StatusCode::BadDecodingError)
                }
            }
            ExtensionObjectBody::Decoded(ref value) => value
                .as_any()
                .downcast_ref::<T>()
                .cloned()
                .ok_or(StatusCode::BadDecodingError),
            _ => {
                error!("decode_inner called on an unsupported ExtensionObject type");
                Err(StatusCode::BadDecodingError)
            }
        }
    }

    /// Resolves a freshly read byte string body against the serializer registry. A registered
    /// encoding id yields the decoded concrete value; an unregistered id is not an error - the
    /// body stays in its opaque byte form so it can be passed through.
    fn resolve_body(
        node_id: &ExpandedNodeId,
        body: ByteString,
        decoding_options: &DecodingOptions,
    ) -> EncodingResult<ExtensionObjectBody> {
        let entry = decoding_options
            .registry
            .as_ref()
            .and_then(|registry| registry.resolve(node_id));
        let Some(entry) = entry else {
            return Ok(ExtensionObjectBody::ByteString(body));
        };
        let Some(ref bytes) = body.value else {
            // A registered type with a null body cannot be decoded, keep it opaque
            return Ok(ExtensionObjectBody::ByteString(body));
        };
        let mut stream = Cursor::new(bytes.as_slice());
        let value = entry.decode(&mut stream, decoding_options)?;
        // An under or over read against the declared length means the stream would
        // desynchronize if this were accepted.
        if stream.position() as usize != bytes.len() {
            error!(
                "Extension object body of {} declared bytes was decoded as {} bytes",
                bytes.len(),
                stream.position()
            );
            Err(StatusCode::BadDecodingError)
        } else {
            Ok(ExtensionObjectBody::Decoded(value))
        }
    }
}
