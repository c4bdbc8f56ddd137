// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Oneof (union) fields.
//!
//! A oneof holds a 32-bit discriminator (the proto tag number of the
//! active member, 0 for none) plus storage for every member. Proto only
//! ever carries the active member; the ROS form writes the discriminator
//! followed by every member in declaration order, inactive members in
//! their zero/empty form, so the layout stays fixed. Submessage members
//! are framed as 0-or-1-element sequences in ROS so absence is
//! representable.

use crate::core::{CodecError, Result};
use crate::encoding::proto::ProtoBuffer;
use crate::encoding::ros::RosBuffer;
use crate::runtime::message::Message;

/// Member storage generated for each oneof.
///
/// The generator emits one struct per oneof holding each member as a
/// regular field (submessage members as [`UnionMessageField`]) and
/// implements this trait to route per-member operations.
pub trait OneofMembers: Default {
    /// Declared proto tag numbers of the members, in declaration order.
    fn member_numbers() -> &'static [i32];

    /// Proto size of the member matching `discriminator` (0 for none).
    fn serialized_proto_size(&self, discriminator: i32) -> usize;

    /// Write the member matching `discriminator` to proto.
    fn write_proto(&self, discriminator: i32, buf: &mut ProtoBuffer<'_>) -> Result<()>;

    /// Parse the member matching `field_number` from proto, returning
    /// the new discriminator value.
    fn parse_proto(&mut self, field_number: u32, buf: &mut ProtoBuffer<'_>) -> Result<i32>;

    /// Sum of every member's ROS size, in declaration order.
    fn serialized_ros_size(&self) -> usize;

    /// Write every member's ROS form, in declaration order.
    fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()>;

    /// Parse every member's ROS form, in declaration order.
    fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()>;
}

/// A discriminated choice among member fields.
#[derive(Debug, Clone, Default)]
pub struct OneofField<S: OneofMembers> {
    discriminator: i32,
    members: S,
}

impl<S: OneofMembers> OneofField<S> {
    /// Create an empty oneof (discriminator 0, members
    /// default-constructed).
    pub fn new() -> Self {
        Self {
            discriminator: 0,
            members: S::default(),
        }
    }

    /// The proto tag number of the active member, or 0 for none.
    pub fn discriminator(&self) -> i32 {
        self.discriminator
    }

    /// Whether the member with `number` is active.
    pub fn is(&self, number: i32) -> bool {
        self.discriminator == number
    }

    /// The member storage.
    pub fn members(&self) -> &S {
        &self.members
    }

    /// Mark the member with `number` active and return the storage for
    /// population.
    pub fn activate(&mut self, number: i32) -> &mut S {
        self.discriminator = number;
        &mut self.members
    }

    /// Proto size: the active member alone, nothing when empty.
    pub fn serialized_proto_size(&self) -> usize {
        if self.discriminator == 0 {
            0
        } else {
            self.members.serialized_proto_size(self.discriminator)
        }
    }

    /// Write only the active member.
    pub fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        if self.discriminator == 0 {
            return Ok(());
        }
        self.members.write_proto(self.discriminator, buf)
    }

    /// Parse the member whose tag number matched, making it active.
    pub fn parse_proto(&mut self, field_number: u32, buf: &mut ProtoBuffer<'_>) -> Result<()> {
        self.discriminator = self.members.parse_proto(field_number, buf)?;
        Ok(())
    }

    /// ROS size: discriminator plus every member.
    pub fn serialized_ros_size(&self) -> usize {
        4 + self.members.serialized_ros_size()
    }

    /// Write the discriminator, then every member in declaration order.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        buf.write_scalar(self.discriminator)?;
        self.members.write_ros(buf)
    }

    /// Read the discriminator, then every member in declaration order.
    /// The discriminator alone tells the consumer which member to read.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        let discriminator = buf.read_scalar::<i32>()?;
        if discriminator != 0 && !S::member_numbers().contains(&discriminator) {
            return Err(CodecError::parse(
                "oneof",
                format!("discriminator {discriminator} is not a declared member"),
            ));
        }
        self.discriminator = discriminator;
        self.members.parse_ros(buf)
    }
}

/// A submessage member of a oneof.
///
/// Proto treats it like any nested message field; the ROS form wraps the
/// body as a 0-or-1-element sequence so an inactive member costs only
/// its 4-byte count.
#[derive(Debug, Clone, Default)]
pub struct UnionMessageField<M: Message + Default> {
    number: i32,
    present: bool,
    msg: M,
}

impl<M: Message + Default> UnionMessageField<M> {
    /// Create an absent member with the given proto tag number.
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

    /// Whether the member holds a message.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The nested message.
    pub fn get(&self) -> &M {
        &self.msg
    }

    /// Mutable access to the nested message; marks the member present.
    pub fn get_mut(&mut self) -> &mut M {
        self.present = true;
        &mut self.msg
    }

    /// Proto size: length-delimited nested body.
    pub fn serialized_proto_size(&self) -> usize {
        ProtoBuffer::length_delimited_size(self.number, self.msg.serialized_proto_size())
    }

    /// Write the length-delimited proto encoding.
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

    /// ROS size: 4-byte count plus the body when present.
    pub fn serialized_ros_size(&self) -> usize {
        if self.present {
            4 + self.msg.serialized_ros_size()
        } else {
            4
        }
    }

    /// Write the 0-or-1-element ROS sequence.
    pub fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()> {
        if self.present {
            buf.write_count(1)?;
            self.msg.write_ros(buf)
        } else {
            buf.write_count(0)
        }
    }

    /// Parse the 0-or-1-element ROS sequence.
    pub fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()> {
        let count = buf.read_count()?;
        match count {
            0 => Ok(()),
            1 => {
                self.msg.parse_ros(buf)?;
                self.present = true;
                Ok(())
            }
            n => Err(CodecError::parse(
                "oneof",
                format!("submessage member sequence count {n} exceeds 1"),
            )),
        }
    }
}
