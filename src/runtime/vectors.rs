// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Repeated fields.
//!
//! Repeated primitives support both packed (one length-delimited run,
//! the proto3 default) and unpacked (one tagged occurrence per element)
//! proto encodings. The ROS form is always a 4-byte count prefix
//! followed by the elements.

use crate::core::{CodecError, Result};
use crate::encoding::proto::{ProtoBuffer, WireType};
use crate::encoding::ros::RosBuffer;
use crate::encoding::scalar::Scalar;
use crate::runtime::message::Message;

/// A dense sequence of primitive values.
#[derive(Debug, Clone)]
pub struct PrimitiveVectorField<T: Scalar, const FIXED: bool, const SIGNED: bool, const PACKED: bool>
{
    number: i32,
    values: Vec<T>,
}

impl<T: Scalar, const FIXED: bool, const SIGNED: bool, const PACKED: bool>
    PrimitiveVectorField<T, FIXED, SIGNED, PACKED>
{
    /// Create an empty field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            values: Vec::new(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// The stored elements in insertion order.
    pub fn get(&self) -> &[T] {
        &self.values
    }

    /// Append an element.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Replace the elements.
    pub fn set(&mut self, values: impl Into<Vec<T>>) {
        self.values = values.into();
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn packed_payload_size(&self) -> usize {
        if FIXED {
            self.values.len() * T::WIRE_SIZE
        } else {
            self.values
                .iter()
                .map(|&v| ProtoBuffer::varint_size(v, SIGNED))
                .sum()
        }
    }

    /// Proto size. Empty repeated fields occupy no bytes.
    pub fn serialized_proto_size(&self) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        if PACKED {
            ProtoBuffer::length_delimited_size(self.number, self.packed_payload_size())
        } else if FIXED {
            self.values.len()
                * (ProtoBuffer::tag_size(self.number, T::FIXED_WIRE_TYPE) + T::WIRE_SIZE)
        } else {
            self.values
                .iter()
                .map(|&v| {
                    ProtoBuffer::tag_size(self.number, WireType::Varint)
                        + ProtoBuffer::varint_size(v, SIGNED)
                })
                .sum()
        }
    }

    /// Write the proto encoding: one length-delimited run when packed,
    /// one tagged occurrence per element otherwise.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if self.values.is_empty() {
            return Ok(());
        }
        if PACKED {
            buf.serialize_length_delimited_header(self.number, self.packed_payload_size())?;
            for &v in &self.values {
                if FIXED {
                    buf.serialize_raw_fixed(v)?;
                } else {
                    buf.serialize_raw_varint(v, SIGNED)?;
                }
            }
            return Ok(());
        }
        for &v in &self.values {
            if FIXED {
                buf.serialize_fixed(self.number, v)?;
            } else {
                buf.serialize_varint(self.number, v, SIGNED)?;
            }
        }
        Ok(())
    }

    /// Parse one proto occurrence of the field.
    ///
    /// Packed parse consumes the whole length-delimited run; unpacked
    /// parse appends a single element per call (the caller's tag loop
    /// sees one tag per element).
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if PACKED {
            let data = buf.deserialize_length_delimited()?;
            if FIXED {
                if data.len() % T::WIRE_SIZE != 0 {
                    return Err(CodecError::parse(
                        "packed repeated",
                        format!(
                            "payload of {} bytes is not a multiple of element size {}",
                            data.len(),
                            T::WIRE_SIZE
                        ),
                    ));
                }
                self.values.reserve(data.len() / T::WIRE_SIZE);
                for chunk in data.chunks_exact(T::WIRE_SIZE) {
                    self.values.push(T::read_le(chunk));
                }
            } else {
                let mut sub = ProtoBuffer::from_slice(data);
                while !sub.eof() {
                    self.values.push(sub.deserialize_varint(SIGNED)?);
                }
            }
        } else if FIXED {
            self.values.push(buf.deserialize_fixed()?);
        } else {
            self.values.push(buf.deserialize_varint(SIGNED)?);
        }
        Ok(())
    }

    /// ROS size: count prefix plus raw elements.
    pub fn serialized_ros_size(&self) -> usize {
        4 + self.values.len() * T::WIRE_SIZE
    }

    /// Write the count-prefixed ROS encoding.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_sequence(&self.values)
    }

    /// Parse the count-prefixed ROS encoding.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        self.values = buf.read_sequence()?;
        Ok(())
    }
}

/// A sequence of strings.
#[derive(Debug, Clone, Default)]
pub struct StringVectorField {
    number: i32,
    values: Vec<Vec<u8>>,
}

impl StringVectorField {
    /// Create an empty field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            values: Vec::new(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// The stored elements in insertion order.
    pub fn get(&self) -> &[Vec<u8>] {
        &self.values
    }

    /// Append an element.
    pub fn push(&mut self, value: impl Into<Vec<u8>>) {
        self.values.push(value.into());
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Proto size: one length-delimited field per element.
    pub fn serialized_proto_size(&self) -> usize {
        self.values
            .iter()
            .map(|v| ProtoBuffer::length_delimited_size(self.number, v.len()))
            .sum()
    }

    /// Write one length-delimited field per element.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        for v in &self.values {
            buf.serialize_length_delimited(self.number, v)?;
        }
        Ok(())
    }

    /// Parse one proto occurrence, appending a single element.
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        self.values.push(buf.deserialize_string()?.to_vec());
        Ok(())
    }

    /// ROS size: count prefix, then each string with its own length
    /// prefix.
    pub fn serialized_ros_size(&self) -> usize {
        4 + self.values.iter().map(|v| 4 + v.len()).sum::<usize>()
    }

    /// Write the count-prefixed ROS encoding.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_count(self.values.len())?;
        for v in &self.values {
            buf.write_string(v)?;
        }
        Ok(())
    }

    /// Parse the count-prefixed ROS encoding.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        let count = buf.read_count()? as usize;
        self.values.clear();
        for _ in 0..count {
            self.values.push(buf.read_string()?);
        }
        Ok(())
    }
}

/// A sequence of nested messages.
#[derive(Debug, Clone, Default)]
pub struct MessageVectorField<M: Message + Default> {
    number: i32,
    msgs: Vec<M>,
}

impl<M: Message + Default> MessageVectorField<M> {
    /// Create an empty field with the given proto tag number.
    pub fn new(number: i32) -> Self {
        Self {
            number,
            msgs: Vec::new(),
        }
    }

    /// The proto tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// The stored elements in insertion order.
    pub fn get(&self) -> &[M] {
        &self.msgs
    }

    /// Append a default-constructed element and return it for
    /// population.
    pub fn add(&mut self) -> &mut M {
        self.msgs.push(M::default());
        self.msgs.last_mut().unwrap()
    }

    /// Append an element.
    pub fn push(&mut self, msg: M) {
        self.msgs.push(msg);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    /// Whether the field holds no elements.
    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    /// Proto size: one length-delimited field per element.
    pub fn serialized_proto_size(&self) -> usize {
        self.msgs
            .iter()
            .map(|m| ProtoBuffer::length_delimited_size(self.number, m.serialized_proto_size()))
            .sum()
    }

    /// Write one length-delimited field per element.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        for m in &self.msgs {
            buf.serialize_length_delimited_header(self.number, m.serialized_proto_size())?;
            m.write_proto(buf)?;
        }
        Ok(())
    }

    /// Parse one proto occurrence, appending a single element.
    pub fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        let data = buf.deserialize_length_delimited()?;
        let mut sub = ProtoBuffer::from_slice(data);
        let mut msg = M::default();
        msg.parse_proto(&mut sub)?;
        self.msgs.push(msg);
        Ok(())
    }

    /// ROS size: count prefix plus each body inline.
    pub fn serialized_ros_size(&self) -> usize {
        4 + self
            .msgs
            .iter()
            .map(|m| m.serialized_ros_size())
            .sum::<usize>()
    }

    /// Write the count-prefixed ROS encoding, each element inline.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_count(self.msgs.len())?;
        for m in &self.msgs {
            m.write_ros(buf)?;
        }
        Ok(())
    }

    /// Parse the count-prefixed ROS encoding.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        let count = buf.read_count()? as usize;
        self.msgs.clear();
        for _ in 0..count {
            let mut msg = M::default();
            msg.parse_ros(buf)?;
            self.msgs.push(msg);
        }
        Ok(())
    }
}
