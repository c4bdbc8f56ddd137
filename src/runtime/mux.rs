// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The multiplexer: a process-wide registry mapping fully-qualified
//! message type names to a vtable of parse/write/size/create operations.
//!
//! `Any`-valued fields and any call site that only knows a dynamic type
//! string dispatch through here. The registry initializes lazily on the
//! first registration; generated files expose a `register_all()` that
//! installs every message from one declarative init point.
//!
//! Registrations happen before any dispatch (single-threaded init);
//! after init the map is effectively read-only, and the `RwLock` only
//! serializes the registration window.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use tracing::debug;

use crate::core::{CodecError, Result};
use crate::encoding::proto::ProtoBuffer;
use crate::encoding::ros::RosBuffer;
use crate::runtime::message::Message;

/// Immutable vtable for one registered message type.
#[derive(Clone, Copy, Debug)]
pub struct MultiplexerInfo {
    /// Construct a default instance.
    pub create: fn() -> Box<dyn Message>,
    /// Populate from the protobuf wire format.
    pub parse_proto: fn(&mut dyn Message, &mut ProtoBuffer<'_>) -> Result<()>,
    /// Populate from the ROS wire format.
    pub parse_ros: fn(&mut dyn Message, &mut RosBuffer<'_>) -> Result<()>,
    /// Serialize to the protobuf wire format.
    pub write_proto: fn(&dyn Message, &mut ProtoBuffer<'_>) -> Result<()>,
    /// Serialize to the ROS wire format.
    pub write_ros: fn(&dyn Message, &mut RosBuffer<'_>) -> Result<()>,
    /// Exact protobuf serialized size.
    pub serialized_proto_size: fn(&dyn Message) -> usize,
    /// Exact ROS serialized size.
    pub serialized_ros_size: fn(&dyn Message) -> usize,
}

fn registry() -> &'static RwLock<HashMap<String, MultiplexerInfo>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, MultiplexerInfo>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Install a message type under its fully-qualified name.
///
/// Re-registration is permitted with last-writer-wins semantics; in
/// practice each name registers once per process.
pub fn register_message(name: &str, info: MultiplexerInfo) {
    debug!(name, "registering message type");
    let mut map = match registry().write() {
        Ok(map) => map,
        Err(poisoned) => poisoned.into_inner(),
    };
    map.insert(name.to_string(), info);
}

/// Look up the vtable for a registered name.
pub fn get_info(name: &str) -> Result<MultiplexerInfo> {
    let map = registry()
        .read()
        .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))?;
    map.get(name)
        .copied()
        .ok_or_else(|| CodecError::type_not_found(name))
}

/// Whether a name is registered.
pub fn is_registered(name: &str) -> bool {
    registry()
        .read()
        .map(|map| map.contains_key(name))
        .unwrap_or(false)
}

/// Construct a default instance of a registered type, or `None` for an
/// unknown name.
pub fn create_message(name: &str) -> Option<Box<dyn Message>> {
    let info = get_info(name).ok()?;
    Some((info.create)())
}

/// Dispatch `parse_proto` by type name.
pub fn parse_proto(name: &str, msg: &mut dyn Message, buf: &mut ProtoBuffer<'_>) -> Result<()> {
    let info = get_info(name)?;
    (info.parse_proto)(msg, buf)
}

/// Dispatch `parse_ros` by type name.
pub fn parse_ros(name: &str, msg: &mut dyn Message, buf: &mut RosBuffer<'_>) -> Result<()> {
    let info = get_info(name)?;
    (info.parse_ros)(msg, buf)
}

/// Dispatch `write_proto` by type name.
pub fn write_proto(name: &str, msg: &dyn Message, buf: &mut ProtoBuffer<'_>) -> Result<()> {
    let info = get_info(name)?;
    (info.write_proto)(msg, buf)
}

/// Dispatch `write_ros` by type name.
pub fn write_ros(name: &str, msg: &dyn Message, buf: &mut RosBuffer<'_>) -> Result<()> {
    let info = get_info(name)?;
    (info.write_ros)(msg, buf)
}

/// Dispatch `serialized_proto_size` by type name.
pub fn serialized_proto_size(name: &str, msg: &dyn Message) -> Result<usize> {
    let info = get_info(name)?;
    Ok((info.serialized_proto_size)(msg))
}

/// Dispatch `serialized_ros_size` by type name.
pub fn serialized_ros_size(name: &str, msg: &dyn Message) -> Result<usize> {
    let info = get_info(name)?;
    Ok((info.serialized_ros_size)(msg))
}
