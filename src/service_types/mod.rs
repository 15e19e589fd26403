// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! A representative, hand maintained set of the standard's service types. The full standard
//! defines thousands of structures whose field lists are mechanical; a complete stack generates
//! them from the type dictionary. The types here are the ones the codec itself and its tests
//! exercise end to end.

mod data_change_filter;
mod enums;
mod monitoring_filter;
mod read_request;
mod read_response;
mod read_value_id;
mod service_fault;

pub use self::{
    data_change_filter::DataChangeFilter,
    enums::{DataChangeTrigger, TimestampsToReturn},
    monitoring_filter::MonitoringFilter,
    read_request::ReadRequest,
    read_response::ReadResponse,
    read_value_id::ReadValueId,
    service_fault::ServiceFault,
};

use crate::registry::EncodeableRegistry;

/// Registers every service type in this module against the supplied registry. A complete stack
/// layers its generated table the same way, see `RegistrySet`.
pub fn register_service_types(registry: &mut EncodeableRegistry) {
    registry.register::<ServiceFault>();
    registry.register::<ReadValueId>();
    registry.register::<ReadRequest>();
    registry.register::<ReadResponse>();
    registry.register::<MonitoringFilter>();
    registry.register::<DataChangeFilter>();
}
