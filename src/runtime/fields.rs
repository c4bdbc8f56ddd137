// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Single value fields.
//!
//! A field carries its proto tag number, a presence flag and typed
//! storage, and knows how to size, write and parse itself in both wire
//! formats. The `FIXED`/`SIGNED` template flags of the field variants
//! are const generics, so the generated code picks the encoding at
//! compile time.

use crate::core::{CodecError, Result};
use crate::encoding::proto::{ProtoBuffer, WireType};
use crate::encoding::ros::RosBuffer;
use crate::encoding::scalar::Scalar;
use crate::runtime::message::Message;

/// A single primitive value.
///
/// `FIXED` selects the fixed-width proto encoding over varint; `SIGNED`
/// selects zigzag pre-encoding for varints. The ROS form is always the
/// raw little-endian value.
#[derive(Debug, Clone)]
pub struct PrimitiveField<T: Scalar, const FIXED: bool, const SIGNED: bool> {
    number: i32,
    present: bool,
    value: T,
}

impl<T: Scalar, const FIXED: bool, const SIGNED: bool> PrimitiveField<T, FIXED, SIGNED> {
    /// Create an absent field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            present: false,
            value: T::default(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Whether the field has been populated.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The stored value (the type default when absent).
    pub fn get(&self) -> T {
        self.value
    }

    /// Store a value and mark the field present.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.present = true;
    }

    /// Proto size of the tag plus encoded value.
    pub fn serialized_proto_size(&self) -> usize {
        if FIXED {
            ProtoBuffer::tag_size(self.number, T::FIXED_WIRE_TYPE) + T::WIRE_SIZE
        } else {
            ProtoBuffer::tag_size(self.number, WireType::Varint)
                + ProtoBuffer::varint_size(self.value, SIGNED)
        }
    }

    /// Write the tagged proto encoding.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if FIXED {
            buf.serialize_fixed(self.number, self.value)
        } else {
            buf.serialize_varint(self.number, self.value, SIGNED)
        }
    }

    /// Parse the proto value following an already-consumed tag.
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        self.value = if FIXED {
            buf.deserialize_fixed()?
        } else {
            buf.deserialize_varint(SIGNED)?
        };
        self.present = true;
        Ok(())
    }

    /// ROS size: the raw scalar width.
    pub fn serialized_ros_size(&self) -> usize {
        T::WIRE_SIZE
    }

    /// Write the raw ROS bytes.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_scalar(self.value)
    }

    /// Parse the raw ROS bytes.
    ///
    /// The ROS encoding is not self-describing about presence: the field
    /// becomes present iff the decoded value is non-zero. Fields whose
    /// legitimate value is zero parse as absent; downstream consumers
    /// rely on this convention.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.value = buf.read_scalar()?;
        self.present = !self.value.is_zero();
        Ok(())
    }
}

/// A UTF-8-or-binary byte sequence.
///
/// Parsing makes an owning copy of the source bytes; messages never
/// alias their parse buffers.
#[derive(Debug, Clone, Default)]
pub struct StringField {
    number: i32,
    present: bool,
    value: Vec<u8>,
}

impl StringField {
    /// Create an absent field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            present: false,
            value: Vec::new(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Whether the field has been populated.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The stored bytes.
    pub fn get(&self) -> &[u8] {
        &self.value
    }

    /// The stored bytes as UTF-8.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.value)
            .map_err(|e| CodecError::parse("string field", e.to_string()))
    }

    /// Store bytes and mark the field present.
    pub fn set(&mut self, value: impl Into<Vec<u8>>) {
        self.value = value.into();
        self.present = true;
    }

    /// Proto size: length-delimited.
    pub fn serialized_proto_size(&self) -> usize {
        ProtoBuffer::length_delimited_size(self.number, self.value.len())
    }

    /// Write the length-delimited proto encoding.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        buf.serialize_length_delimited(self.number, &self.value)
    }

    /// Parse the length-delimited proto value.
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        self.value = buf.deserialize_string()?.to_vec();
        self.present = true;
        Ok(())
    }

    /// ROS size: 4-byte length prefix plus the bytes.
    pub fn serialized_ros_size(&self) -> usize {
        4 + self.value.len()
    }

    /// Write the length-prefixed ROS encoding.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_string(&self.value)
    }

    /// Parse the length-prefixed ROS encoding; presence follows from a
    /// non-zero length.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.value = buf.read_string()?;
        self.present = !self.value.is_empty();
        Ok(())
    }
}

/// A nested message.
///
/// Proto frames the nested body as a length-delimited field; the ROS
/// form is the body inline with no framing.
#[derive(Debug, Clone, Default)]
pub struct MessageField<M: Message + Default> {
    number: i32,
    present: bool,
    msg: M,
}

impl<M: Message + Default> MessageField<M> {
    /// Create an absent field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            present: false,
            msg: M::default(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Whether the field has been populated.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The nested message.
    pub fn get(&self) -> &M {
        &self.msg
    }

    /// Mutable access to the nested message; marks the field present.
    pub fn get_mut(&mut self) -> &mut M {
        self.present = true;
        &mut self.msg
    }

    /// Proto size: the nested body wrapped length-delimited.
    pub fn serialized_proto_size(&self) -> usize {
        ProtoBuffer::length_delimited_size(self.number, self.msg.serialized_proto_size())
    }

    /// Write the length-delimited header then the nested body.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        buf.serialize_length_delimited_header(self.number, self.msg.serialized_proto_size())?;
        self.msg.write_proto(buf)
    }

    /// Parse the length-delimited nested body.
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        let data = buf.deserialize_length_delimited()?;
        let mut sub = ProtoBuffer::from_slice(data);
        self.msg.parse_proto(&mut sub)?;
        self.present = true;
        Ok(())
    }

    /// ROS size: the nested body, no framing.
    pub fn serialized_ros_size(&self) -> usize {
        self.msg.serialized_ros_size()
    }

    /// Write the nested body inline.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.msg.write_ros(buf)
    }

    /// Parse the nested body inline; its fixed composition defines its
    /// extent.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.msg.parse_ros(buf)?;
        self.present = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_field_starts_absent() {
        let field: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        assert_eq!(field.number(), 1);
        assert!(!field.is_present());
        assert_eq!(field.get(), 0);
    }

    #[test]
    fn test_primitive_field_set_marks_present() {
        let mut field: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        field.set(1234);
        assert!(field.is_present());
        assert_eq!(field.get(), 1234);
    }

    #[test]
    fn test_primitive_varint_proto_round_trip() {
        let mut field: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        field.set(1234);
        assert_eq!(field.serialized_proto_size(), 3);

        let mut buf = ProtoBuffer::new();
        field.write_proto(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[0x08, 0xd2, 0x09]);
        assert_eq!(buf.len(), field.serialized_proto_size());

        let bytes = buf.into_vec();
        let mut rd = ProtoBuffer::from_slice(&bytes);
        rd.deserialize_tag().unwrap();
        let mut parsed: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        parsed.parse_proto(&mut rd).unwrap();
        assert!(parsed.is_present());
        assert_eq!(parsed.get(), 1234);
    }

    #[test]
    fn test_primitive_fixed_proto_encoding() {
        let mut field: PrimitiveField<i32, true, false> = PrimitiveField::new(2);
        field.set(1_234_567_890);
        assert_eq!(field.serialized_proto_size(), 5);

        let mut buf = ProtoBuffer::new();
        field.write_proto(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[0x15, 0xd2, 0x02, 0x96, 0x49]);
    }

    #[test]
    fn test_primitive_zigzag_proto_encoding() {
        let mut field: PrimitiveField<i32, false, true> = PrimitiveField::new(1);
        field.set(-1);
        let mut buf = ProtoBuffer::new();
        field.write_proto(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[0x08, 0x01]);
    }

    #[test]
    fn test_primitive_ros_round_trip() {
        let mut field: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        field.set(1234);
        assert_eq!(field.serialized_ros_size(), 4);

        let mut buf = RosBuffer::new();
        field.write_ros(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[0xd2, 0x04, 0x00, 0x00]);

        let bytes = buf.into_vec();
        let mut rd = RosBuffer::from_slice(&bytes);
        let mut parsed: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
        parsed.parse_ros(&mut rd).unwrap();
        assert!(parsed.is_present());
        assert_eq!(parsed.get(), 1234);
    }

    #[test]
    fn test_primitive_ros_zero_parses_absent() {
        let bytes = [0u8; 4];
        let mut rd = RosBuffer::from_slice(&bytes);
        let mut field: PrimitiveField<u32, false, false> = PrimitiveField::new(1);
        field.parse_ros(&mut rd).unwrap();
        assert!(!field.is_present());
        assert_eq!(field.get(), 0);
    }

    #[test]
    fn test_string_field_proto_round_trip() {
        let mut field = StringField::new(3);
        field.set("hello world");
        assert_eq!(field.serialized_proto_size(), 13);

        let mut buf = ProtoBuffer::new();
        field.write_proto(&mut buf).unwrap();
        assert_eq!(buf.len(), 13);

        let bytes = buf.into_vec();
        let mut rd = ProtoBuffer::from_slice(&bytes);
        rd.deserialize_tag().unwrap();
        let mut parsed = StringField::new(3);
        parsed.parse_proto(&mut rd).unwrap();
        assert!(parsed.is_present());
        assert_eq!(parsed.as_str().unwrap(), "hello world");
    }

    #[test]
    fn test_string_field_ros_round_trip() {
        let mut field = StringField::new(3);
        field.set("hello");
        assert_eq!(field.serialized_ros_size(), 9);

        let mut buf = RosBuffer::new();
        field.write_ros(&mut buf).unwrap();
        let bytes = buf.into_vec();

        let mut rd = RosBuffer::from_slice(&bytes);
        let mut parsed = StringField::new(3);
        parsed.parse_ros(&mut rd).unwrap();
        assert!(parsed.is_present());
        assert_eq!(parsed.get(), b"hello");
    }

    #[test]
    fn test_string_field_ros_empty_parses_absent() {
        let bytes = [0u8; 4];
        let mut rd = RosBuffer::from_slice(&bytes);
        let mut field = StringField::new(3);
        field.parse_ros(&mut rd).unwrap();
        assert!(!field.is_present());
    }

    #[test]
    fn test_string_field_binary_bytes() {
        let mut field = StringField::new(4);
        field.set(vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(field.as_str().is_err());
        assert_eq!(field.get(), &[0xde, 0xad, 0xbe, 0xef]);
    }
}
