// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

use std::io::{Read, Write};

use crate::{encoding::*, status_code::StatusCode};

/// The enumeration for the timestamps a read or subscription operation should return.
/// Enumerations are encoded as Int32 values.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimestampsToReturn {
    Source = 0,
    Server = 1,
    Both = 2,
    Neither = 3,
}

impl BinaryEncoder<TimestampsToReturn> for TimestampsToReturn {
    fn byte_len(&self) -> usize {
        4
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        write_i32(stream, *self as i32)
    }

    fn decode<S: Read>(stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
        let value = read_i32(stream)?;
        match value {
            0 => Ok(TimestampsToReturn::Source),
            1 => Ok(TimestampsToReturn::Server),
            2 => Ok(TimestampsToReturn::Both),
            3 => Ok(TimestampsToReturn::Neither),
            _ => {
                error!("Invalid value {} for enum TimestampsToReturn", value);
                Err(StatusCode::BadDecodingError)
            }
        }
    }
}

/// The condition under which a data change notification fires.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataChangeTrigger {
    Status = 0,
    StatusValue = 1,
    StatusValueTimestamp = 2,
}

impl BinaryEncoder<DataChangeTrigger> for DataChangeTrigger {
    fn byte_len(&self) -> usize {
        4
    }

    fn encode<S: Write>(&self, stream: &mut S) -> EncodingResult<usize> {
        write_i32(stream, *self as i32)
    }

    fn decode<S: Read>(stream: &mut S, _: &DecodingOptions) -> EncodingResult<Self> {
        let value = read_i32(stream)?;
        match value {
            0 => Ok(DataChangeTrigger::Status),
            1 => Ok(DataChangeTrigger::StatusValue),
            2 => Ok(DataChangeTrigger::StatusValueTimestamp),
            _ => {
                error!("Invalid value {} for enum DataChangeTrigger", value);
                Err(StatusCode::BadDecodingError)
            }
        }
    }
}
