// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `StatusCode`, the packed severity + code word used to report
//! outcomes everywhere in the protocol, including by this codec itself.
//!
//! The full standard defines hundreds of codes; this table carries the severity / info masks and
//! the codes the codec layer and its immediate callers use. The codec treats the word as opaque
//! apart from the documented severity bits.

use std::{
    error::Error,
    fmt,
    fmt::Formatter,
    io::{self, Read, Write},
};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::encoding::*;

bitflags! {
    pub struct StatusCode: u32 {
        // Mask for the status code section
        const STATUS_MASK = 0xffff_0000;
        // Mask for the bits section
        const BIT_MASK = 0x0000_ffff;

        // Severity bits
        const IS_ERROR = 0x8000_0000;
        const IS_UNCERTAIN = 0x4000_0000;

        // Historian bits 0:4
        const HISTORICAL_RAW          = 0b0000_0000_0000_0000;
        const HISTORICAL_CALCULATED   = 0b0000_0000_0000_0001;
        const HISTORICAL_INTERPOLATED = 0b0000_0000_0000_0010;
        const HISTORICAL_PARTIAL      = 0b0000_0000_0000_0100;
        const HISTORICAL_EXTRA_DATA   = 0b0000_0000_0000_1000;
        const HISTORICAL_MULTI_VALUE  = 0b0000_0000_0001_0000;
        // Overflow bit 7
        const OVERFLOW                = 0b0000_0000_1000_0000;
        // Limit bits 8:9
        const LIMIT_LOW               = 0b0000_0001_0000_0000;
        const LIMIT_HIGH              = 0b0000_0010_0000_0000;
        const LIMIT_CONSTANT          = 0b0000_0011_0000_0000;
        // Semantics changed bit 14
        const SEMANTICS_CHANGED       = 0b0100_0000_0000_0000;
        // Structure changed bit 15
        const STRUCTURE_CHANGED       = 0b1000_0000_0000_0000;

        // The operation succeeded
        const Good = 0;
        const GoodClamped = 0x0030_0000;
        const GoodOverload = 0x002f_0000;

        const UncertainLastUsableValue = 0x4090_0000;

        const BadUnexpectedError = 0x8001_0000;
        const BadInternalError = 0x8002_0000;
        const BadOutOfMemory = 0x8003_0000;
        const BadResourceUnavailable = 0x8004_0000;
        const BadCommunicationError = 0x8005_0000;
        const BadEncodingError = 0x8006_0000;
        const BadDecodingError = 0x8007_0000;
        const BadEncodingLimitsExceeded = 0x8008_0000;
        const BadUnknownResponse = 0x8009_0000;
        const BadTimeout = 0x800a_0000;
        const BadServiceUnsupported = 0x800b_0000;
        const BadNothingToDo = 0x800f_0000;
        const BadTooManyOperations = 0x8010_0000;
        const BadDataTypeIdUnknown = 0x8011_0000;
        const BadNodeIdInvalid = 0x8033_0000;
        const BadNodeIdUnknown = 0x8034_0000;
        const BadAttributeIdInvalid = 0x8035_0000;
        const BadIndexRangeInvalid = 0x8036_0000;
        const BadNotReadable = 0x803a_0000;
        const BadOutOfRange = 0x803c_0000;
        const BadNotSupported = 0x803d_0000;
        const BadArgumentsMissing = 0x8076_0000;
        const BadInvalidArgument = 0x80ab_0000;
    }
}

// The bitflags! macro implements Debug for StatusCode but it fouls the display because status
// codes are a combination of bits and unique values.

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        // Displays the StatusCode as it's name, or its name+bitflags
        let bits = self.bitflags();
        if bits.is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}+{:?}", self.name(), bits)
        }
    }
}

impl BinaryEncoder<StatusCode> for StatusCode {
    fn byte_len(&self) -> usize {
        4
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        write_u32(stream, self.bits())
    }

    fn decode<S: Read>(stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
        Ok(StatusCode::from_bits_truncate(read_u32(stream)?))
    }
}

impl Error for StatusCode {}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Good
    }
}

impl StatusCode {
    /// Returns the bit flags of the status code, i.e. it masks out the actual status code value
    pub fn bitflags(&self) -> StatusCode {
        *self & StatusCode::BIT_MASK
    }

    /// Returns the status only, i.e. it masks out any bit flags that come with the status code
    pub fn status(&self) -> StatusCode {
        *self & StatusCode::STATUS_MASK
    }

    /// Tests if the status code is bad
    pub fn is_bad(&self) -> bool {
        self.contains(StatusCode::IS_ERROR)
    }

    /// Tests if the status code is uncertain
    pub fn is_uncertain(&self) -> bool {
        self.contains(StatusCode::IS_UNCERTAIN)
    }

    /// Tests if the status code is good (i.e. not bad or uncertain)
    pub fn is_good(&self) -> bool {
        !self.is_bad() && !self.is_uncertain()
    }

    /// The name of the status, minus any bit flags carried with it
    pub fn name(&self) -> &'static str {
        match self.status() {
            StatusCode::Good => "Good",
            StatusCode::GoodClamped => "GoodClamped",
            StatusCode::GoodOverload => "GoodOverload",
            StatusCode::UncertainLastUsableValue => "UncertainLastUsableValue",
            StatusCode::BadUnexpectedError => "BadUnexpectedError",
            StatusCode::BadInternalError => "BadInternalError",
            StatusCode::BadOutOfMemory => "BadOutOfMemory",
            StatusCode::BadResourceUnavailable => "BadResourceUnavailable",
            StatusCode::BadCommunicationError => "BadCommunicationError",
            StatusCode::BadEncodingError => "BadEncodingError",
            StatusCode::BadDecodingError => "BadDecodingError",
            StatusCode::BadEncodingLimitsExceeded => "BadEncodingLimitsExceeded",
            StatusCode::BadUnknownResponse => "BadUnknownResponse",
            StatusCode::BadTimeout => "BadTimeout",
            StatusCode::BadServiceUnsupported => "BadServiceUnsupported",
            StatusCode::BadNothingToDo => "BadNothingToDo",
            StatusCode::BadTooManyOperations => "BadTooManyOperations",
            StatusCode::BadDataTypeIdUnknown => "BadDataTypeIdUnknown",
            StatusCode::BadNodeIdInvalid => "BadNodeIdInvalid",
            StatusCode::BadNodeIdUnknown => "BadNodeIdUnknown",
            StatusCode::BadAttributeIdInvalid => "BadAttributeIdInvalid",
            StatusCode::BadIndexRangeInvalid => "BadIndexRangeInvalid",
            StatusCode::BadNotReadable => "BadNotReadable",
            StatusCode::BadOutOfRange => "BadOutOfRange",
            StatusCode::BadNotSupported => "BadNotSupported",
            StatusCode::BadArgumentsMissing => "BadArgumentsMissing",
            StatusCode::BadInvalidArgument => "BadInvalidArgument",
            _ => "Unknown",
        }
    }
}

impl From<StatusCode> for io::Error {
    fn from(e: StatusCode) -> io::Error {
        io::Error::new(io::ErrorKind::Other, format!("StatusCode {}", e))
    }
}

// Serialize / Deserialize are manually implemented because bitflags! doesn't do it.

impl Serialize for StatusCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

struct StatusCodeVisitor;

impl<'de> Visitor<'de> for StatusCodeVisitor {
    type Value = u32;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an unsigned 32-bit integer")
    }

    fn visit_u32<E>(self, value: u32) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    // Formats such as JSON carry all integers as u64
    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u32::try_from(value)
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Unsigned(value), &self))
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(StatusCode::from_bits_truncate(
            deserializer.deserialize_u32(StatusCodeVisitor)?,
        ))
    }
}

#[test]
fn status_code() {
    assert!(StatusCode::Good.is_good());
    assert!(!StatusCode::Good.is_bad());
    assert!(!StatusCode::Good.is_uncertain());

    assert!(StatusCode::UncertainLastUsableValue.is_uncertain());
    assert!(!StatusCode::UncertainLastUsableValue.is_bad());
    assert!(!StatusCode::UncertainLastUsableValue.is_good());

    assert!(StatusCode::BadDecodingError.is_bad());
    assert!(!StatusCode::BadDecodingError.is_uncertain());
    assert!(!StatusCode::BadDecodingError.is_good());

    assert_eq!(
        (StatusCode::BadDecodingError | StatusCode::HISTORICAL_CALCULATED).status(),
        StatusCode::BadDecodingError
    );
    assert_eq!(
        (StatusCode::BadDecodingError | StatusCode::HISTORICAL_CALCULATED).bitflags(),
        StatusCode::HISTORICAL_CALCULATED
    );
}
