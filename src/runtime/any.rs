// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `google.protobuf.Any` support.
//!
//! An [`AnyMessage`] is a fixed pair: a `type_url` string (tag 1) and an
//! owned polymorphic submessage `value` (tag 2). The value's concrete
//! type is derived from the `type_url` by stripping everything up to and
//! including the last `/`, and instances are produced through the
//! multiplexer from that name. Parsing an `Any` whose type is not
//! registered fails.

use crate::core::{CodecError, Result};
use crate::encoding::proto::{ProtoBuffer, FIELD_ID_SHIFT};
use crate::encoding::ros::RosBuffer;
use crate::runtime::fields::{MessageField, StringField};
use crate::runtime::message::Message;
use crate::runtime::mux::{self, MultiplexerInfo};

/// Field number of `type_url`.
const TYPE_URL_NUMBER: i32 = 1;
/// Field number of `value`.
const VALUE_NUMBER: i32 = 2;

/// Hand-coded message representing a `google.protobuf.Any`.
pub struct AnyMessage {
    populated: bool,
    type_url: StringField,
    value: Option<Box<dyn Message>>,
}

impl Default for AnyMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl AnyMessage {
    /// Simple type name.
    pub const NAME: &'static str = "Any";
    /// Fully-qualified protobuf name, also the registry key.
    pub const FULL_NAME: &'static str = "google.protobuf.Any";

    /// Create an empty `Any`.
    pub fn new() -> Self {
        Self {
            populated: false,
            type_url: StringField::new(TYPE_URL_NUMBER),
            value: None,
        }
    }

    /// The `type_url` bytes.
    pub fn type_url(&self) -> &[u8] {
        self.type_url.get()
    }

    /// Whether `type_url` has been populated.
    pub fn has_type_url(&self) -> bool {
        self.type_url.is_present()
    }

    /// Set the `type_url`.
    pub fn set_type_url(&mut self, url: impl Into<Vec<u8>>) {
        self.type_url.set(url);
    }

    /// The embedded value, if any.
    pub fn value(&self) -> Option<&dyn Message> {
        self.value.as_deref()
    }

    /// Install an embedded value and point `type_url` at its type.
    pub fn pack(&mut self, msg: Box<dyn Message>) {
        self.type_url
            .set(format!("type.googleapis.com/{}", msg.full_name()));
        self.value = Some(msg);
    }

    /// The registry name derived from `type_url`: the substring after
    /// the last `/`, or the whole url when it has no `/`.
    pub fn message_type_name(&self) -> Result<&str> {
        let url = self.type_url.as_str()?;
        Ok(match url.rfind('/') {
            Some(pos) => &url[pos + 1..],
            None => url,
        })
    }

    fn create_value_instance(&self) -> Result<Box<dyn Message>> {
        let type_name = self.message_type_name()?;
        mux::create_message(type_name).ok_or_else(|| CodecError::type_not_found(type_name))
    }

    /// Proto size of the fields that are present.
    pub fn serialized_proto_size(&self) -> usize {
        let mut size = 0;
        if self.type_url.is_present() {
            size += self.type_url.serialized_proto_size();
        }
        if let Some(value) = &self.value {
            size += ProtoBuffer::length_delimited_size(VALUE_NUMBER, value.serialized_proto_size());
        }
        size
    }

    /// Write `type_url`, then the value serialized into a temporary
    /// buffer and wrapped as a length-delimited field with tag 2.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if self.type_url.is_present() {
            self.type_url.write_proto(buf)?;
        }
        if let Some(value) = &self.value {
            let mut tmp = ProtoBuffer::new();
            value.write_proto(&mut tmp)?;
            buf.serialize_length_delimited(VALUE_NUMBER, tmp.as_slice())?;
        }
        Ok(())
    }

    /// Tag-dispatch parse. Field 2 creates the value instance through
    /// the multiplexer keyed by [`AnyMessage::message_type_name`].
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if self.populated {
            return Err(CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        while !buf.eof() {
            let tag = buf.deserialize_tag()?;
            match tag >> FIELD_ID_SHIFT {
                1 => self.type_url.parse_proto(buf)?,
                2 => {
                    let mut msg = self.create_value_instance()?;
                    let data = buf.deserialize_length_delimited()?;
                    let mut sub = ProtoBuffer::from_slice(data);
                    msg.parse_proto(&mut sub)?;
                    self.value = Some(msg);
                }
                _ => buf.skip_tag(tag)?,
            }
        }
        Ok(())
    }

    /// ROS size: length-prefixed url plus length-prefixed value bytes.
    pub fn serialized_ros_size(&self) -> usize {
        self.type_url.serialized_ros_size()
            + 4
            + self
                .value
                .as_ref()
                .map(|v| v.serialized_ros_size())
                .unwrap_or(0)
    }

    /// Write `type_url`, then the value serialized into a temporary
    /// buffer and emitted as a length-prefixed byte string.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.type_url.write_ros(buf)?;
        let mut tmp = RosBuffer::new();
        if let Some(value) = &self.value {
            value.write_ros(&mut tmp)?;
        }
        buf.write_string(tmp.as_slice())
    }

    /// Parse `type_url`; when absent consume the value length and stop,
    /// otherwise resolve the type and parse the value bytes.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        if self.populated {
            return Err(CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        self.type_url.parse_ros(buf)?;
        let len = buf.read_count()? as usize;
        if !self.type_url.is_present() {
            return buf.skip(len);
        }
        if len > 0 {
            let mut msg = self.create_value_instance()?;
            let data = buf.read_bytes(len)?;
            let mut sub = RosBuffer::from_slice(data);
            msg.parse_ros(&mut sub)?;
            self.value = Some(msg);
        }
        Ok(())
    }

    /// Install the `Any` vtable in the multiplexer.
    pub fn register() {
        mux::register_message(Self::FULL_NAME, ANY_MULTIPLEXER);
    }
}

impl Message for AnyMessage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn full_name(&self) -> &'static str {
        Self::FULL_NAME
    }

    fn serialized_proto_size(&self) -> usize {
        AnyMessage::serialized_proto_size(self)
    }

    fn serialized_ros_size(&self) -> usize {
        AnyMessage::serialized_ros_size(self)
    }

    fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        AnyMessage::write_proto(self, buf)
    }

    fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        AnyMessage::write_ros(self, buf)
    }

    fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        AnyMessage::parse_proto(self, buf)
    }

    fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        AnyMessage::parse_ros(self, buf)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn any_create() -> Box<dyn Message> {
    Box::new(AnyMessage::new())
}

fn any_parse_proto(msg: &mut dyn Message, buf: &mut ProtoBuffer<'_>) -> Result<()> {
    match msg.as_any_mut().downcast_mut::<AnyMessage>() {
        Some(m) => m.parse_proto(buf),
        None => Err(CodecError::invariant_violation("Any vtable type mismatch")),
    }
}

fn any_parse_ros(msg: &mut dyn Message, buf: &mut RosBuffer<'_>) -> Result<()> {
    match msg.as_any_mut().downcast_mut::<AnyMessage>() {
        Some(m) => m.parse_ros(buf),
        None => Err(CodecError::invariant_violation("Any vtable type mismatch")),
    }
}

fn any_write_proto(msg: &dyn Message, buf: &mut ProtoBuffer<'_>) -> Result<()> {
    match msg.as_any().downcast_ref::<AnyMessage>() {
        Some(m) => m.write_proto(buf),
        None => Err(CodecError::invariant_violation("Any vtable type mismatch")),
    }
}

fn any_write_ros(msg: &dyn Message, buf: &mut RosBuffer<'_>) -> Result<()> {
    match msg.as_any().downcast_ref::<AnyMessage>() {
        Some(m) => m.write_ros(buf),
        None => Err(CodecError::invariant_violation("Any vtable type mismatch")),
    }
}

fn any_serialized_proto_size(msg: &dyn Message) -> usize {
    msg.serialized_proto_size()
}

fn any_serialized_ros_size(msg: &dyn Message) -> usize {
    msg.serialized_ros_size()
}

/// Vtable for [`AnyMessage`].
pub const ANY_MULTIPLEXER: MultiplexerInfo = MultiplexerInfo {
    create: any_create,
    parse_proto: any_parse_proto,
    parse_ros: any_parse_ros,
    write_proto: any_write_proto,
    write_ros: any_write_ros,
    serialized_proto_size: any_serialized_proto_size,
    serialized_ros_size: any_serialized_ros_size,
};

/// An `Any`-typed field: a nested [`AnyMessage`].
pub type AnyField = MessageField<AnyMessage>;
